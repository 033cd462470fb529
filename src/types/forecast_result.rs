use crate::encoding::category_encoder::CategoryCode;
use crate::types::compass::CompassPoint;
use crate::types::snapshot::CurrentWeatherSnapshot;
use serde::{Deserialize, Serialize};

/// Five hourly steps of extrapolated temperature and humidity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureForecast {
    /// `HH:00` labels, one hour apart, starting one hour after the forecast was made.
    pub times: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
}

/// Everything a forecast invocation produces.
///
/// Serializes flat: the snapshot fields sit next to the derived ones, matching
/// the JSON consumed by existing clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    #[serde(flatten)]
    pub current: CurrentWeatherSnapshot,
    pub wind_direction: CompassPoint,
    /// Code of `wind_direction` in this run's encoder; `null` if it never appeared
    /// in the historical data.
    pub wind_direction_code: CategoryCode,
    pub rain_probability: u8,
    #[serde(with = "yes_no")]
    pub will_rain: bool,
    pub future_forecast: FutureForecast,
}

mod yes_no {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "Yes" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "Yes" => Ok(true),
            "No" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"\"Yes\" or \"No\"",
            )),
        }
    }
}
