//! City lookup from the caller's public IP address.
//!
//! The IP lookup gives coordinates (`loc: "lat,lng"`) and its own guess of the
//! city. When an OpenCage key is configured the coordinates are reverse geocoded
//! and the first of `city`, `town` or `village` wins; otherwise the IP lookup's
//! guess is used directly.

use crate::clients::error::WeatherApiError;
use crate::clients::CityLocator;
use crate::config::GeolocationConfig;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IpInfo {
    loc: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    components: GeocodeComponents,
}

#[derive(Debug, Deserialize)]
struct GeocodeComponents {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl GeocodeComponents {
    fn settlement(self) -> Option<String> {
        [self.city, self.town, self.village]
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .find(|name| !name.is_empty())
    }
}

/// Parses `"lat,lng"` into a coordinate pair.
fn parse_loc(loc: &str) -> Option<(f64, f64)> {
    let (lat, lng) = loc.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;
    (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// [`CityLocator`] backed by an ipinfo-style endpoint and OpenCage.
pub struct IpCityLocator {
    client: Client,
    config: GeolocationConfig,
}

impl IpCityLocator {
    pub fn new(config: GeolocationConfig) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WeatherApiError::ClientBuild)?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        display_url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherApiError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(display_url.to_string(), e.without_url()))?;

        let response = response.error_for_status().map_err(|e| {
            warn!("HTTP error for {}: {:?}", display_url, e.status());
            match e.status() {
                Some(status) => WeatherApiError::HttpStatus {
                    url: display_url.to_string(),
                    status,
                    source: e.without_url(),
                },
                None => WeatherApiError::NetworkRequest(display_url.to_string(), e.without_url()),
            }
        })?;

        let body = response
            .text()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(display_url.to_string(), e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| WeatherApiError::Decode {
            url: display_url.to_string(),
            message: e.to_string(),
        })
    }

    async fn reverse_geocode(
        &self,
        api_key: &str,
        (lat, lng): (f64, f64),
    ) -> Result<Option<String>, WeatherApiError> {
        let url = format!(
            "{}/geocode/v1/json",
            self.config.opencage_base_url.trim_end_matches('/')
        );
        let position = format!("{lat}+{lng}");
        let response: GeocodeResponse = self
            .get_json(&url, &url, &[("q", position.as_str()), ("key", api_key)])
            .await?;
        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.components.settlement()))
    }
}

impl CityLocator for IpCityLocator {
    async fn locate_city(&self) -> Result<Option<String>, WeatherApiError> {
        let ip_url = self.config.ip_lookup_url.as_str();
        info!("Looking up location from {}", ip_url);
        let info: IpInfo = self.get_json(ip_url, ip_url, &[]).await?;

        let Some(api_key) = self.config.opencage_api_key.as_deref() else {
            debug!("No reverse geocoding key configured, using IP lookup city");
            return Ok(non_blank(info.city));
        };
        let Some(position) = info.loc.as_deref().and_then(parse_loc) else {
            warn!("IP lookup returned no usable coordinates");
            return Ok(non_blank(info.city));
        };

        let city = self.reverse_geocode(api_key, position).await?;
        if let Some(name) = &city {
            info!("Located caller in {}", name);
        }
        Ok(city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_ip_lookup(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn locator(server: &MockServer, key: Option<&str>) -> IpCityLocator {
        IpCityLocator::new(
            GeolocationConfig::builder()
                .ip_lookup_url(format!("{}/json", server.uri()))
                .maybe_opencage_api_key(key)
                .opencage_base_url(server.uri())
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_loc() {
        assert_eq!(parse_loc("6.9271,79.8612"), Some((6.9271, 79.8612)));
        assert_eq!(parse_loc(" 6.5 , -1.25 "), Some((6.5, -1.25)));
        assert_eq!(parse_loc("6.9271"), None);
        assert_eq!(parse_loc("north,east"), None);
    }

    #[test]
    fn test_settlement_preference() {
        let components = GeocodeComponents {
            city: None,
            town: Some("Negombo".to_string()),
            village: Some("Kochchikade".to_string()),
        };
        assert_eq!(components.settlement(), Some("Negombo".to_string()));

        let components = GeocodeComponents {
            city: Some(" ".to_string()),
            town: None,
            village: Some("Kochchikade".to_string()),
        };
        assert_eq!(components.settlement(), Some("Kochchikade".to_string()));
    }

    #[tokio::test]
    async fn test_reverse_geocodes_ip_position() {
        let server = MockServer::start().await;
        mount_ip_lookup(&server, json!({ "ip": "203.0.113.9", "loc": "6.9271,79.8612", "city": "Wrong" })).await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("q", "6.9271+79.8612"))
            .and(query_param("key", "cage-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "components": { "city": "Colombo", "country": "Sri Lanka" } }]
            })))
            .mount(&server)
            .await;

        let city = locator(&server, Some("cage-key")).locate_city().await.unwrap();

        assert_eq!(city.as_deref(), Some("Colombo"));
    }

    #[tokio::test]
    async fn test_no_geocode_results_is_none() {
        let server = MockServer::start().await;
        mount_ip_lookup(&server, json!({ "loc": "0.0,0.0" })).await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let city = locator(&server, Some("cage-key")).locate_city().await.unwrap();

        assert_eq!(city, None);
    }

    #[tokio::test]
    async fn test_without_key_uses_ip_city() {
        let server = MockServer::start().await;
        mount_ip_lookup(&server, json!({ "loc": "6.9271,79.8612", "city": "Colombo" })).await;

        let city = locator(&server, None).locate_city().await.unwrap();

        assert_eq!(city.as_deref(), Some("Colombo"));
    }

    #[tokio::test]
    async fn test_failed_ip_lookup_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = locator(&server, Some("cage-key")).locate_city().await.unwrap_err();

        assert!(err.is_network());
    }
}
