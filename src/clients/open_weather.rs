//! Current conditions from the OpenWeather `weather` endpoint.

use crate::clients::error::WeatherApiError;
use crate::clients::WeatherProvider;
use crate::config::OpenWeatherConfig;
use crate::types::snapshot::CurrentWeatherSnapshot;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
    sys: OwmSys,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn whole(value: f64) -> i32 {
    value.round() as i32
}

impl OwmResponse {
    fn into_snapshot(self, url: &str) -> Result<CurrentWeatherSnapshot, WeatherApiError> {
        let description = self
            .weather
            .first()
            .map(|w| capitalize(&w.description))
            .ok_or_else(|| WeatherApiError::Decode {
                url: url.to_string(),
                message: "response has no weather conditions".to_string(),
            })?;
        let wind_gust_dir = match self.wind.deg {
            Some(deg) => whole(deg),
            None => {
                warn!("No wind bearing reported for {}; assuming 0°", self.name);
                0
            }
        };
        Ok(CurrentWeatherSnapshot {
            city: self.name,
            country: self.sys.country,
            description,
            current_temp: whole(self.main.temp),
            feels_like: whole(self.main.feels_like),
            temp_min: whole(self.main.temp_min),
            temp_max: whole(self.main.temp_max),
            humidity: whole(self.main.humidity),
            pressure: whole(self.main.pressure),
            wind_gust_dir,
            wind_gust_speed: self.wind.speed,
        })
    }
}

/// [`WeatherProvider`] backed by OpenWeather, metric units.
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WeatherApiError::ClientBuild)?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }
}

impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeatherSnapshot, WeatherApiError> {
        let endpoint = self.endpoint();
        // Never include the API key in anything that gets logged or returned.
        let display_url = format!("{endpoint}?q={city}");
        info!("Fetching current weather from {}", display_url);

        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(display_url.clone(), e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", display_url, e.status());
                return Err(match e.status() {
                    Some(StatusCode::NOT_FOUND) => WeatherApiError::CityNotFound(city.to_string()),
                    Some(status) => WeatherApiError::HttpStatus {
                        url: display_url,
                        status,
                        source: e.without_url(),
                    },
                    None => WeatherApiError::NetworkRequest(display_url, e.without_url()),
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(display_url.clone(), e.without_url()))?;
        let parsed: OwmResponse =
            serde_json::from_str(&body).map_err(|e| WeatherApiError::Decode {
                url: display_url.clone(),
                message: e.to_string(),
            })?;
        parsed.into_snapshot(&display_url)
    }
}
