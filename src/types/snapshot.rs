use serde::{Deserialize, Serialize};

/// Current conditions for one city, as reported by the weather provider.
///
/// Temperatures are whole degrees Celsius, humidity is a whole percentage and
/// pressure is in hPa. Field names follow the JSON the service has always emitted,
/// including the capitalised `WindGustSpeed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherSnapshot {
    pub city: String,
    pub country: String,
    pub description: String,
    pub current_temp: i32,
    pub feels_like: i32,
    pub temp_min: i32,
    pub temp_max: i32,
    pub humidity: i32,
    pub pressure: i32,
    /// Wind bearing in degrees, 0–359.
    pub wind_gust_dir: i32,
    #[serde(rename = "WindGustSpeed")]
    pub wind_gust_speed: f64,
}
