//! Explicit configuration for the forecasting pipeline and its HTTP collaborators.
//!
//! Nothing here has a hard-coded credential: API keys are always supplied by the caller.

use crate::model::forest::ForestConfig;
use crate::model::rain::DEFAULT_HOLDOUT_RATIO;
use bon::Builder;
use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_OPENCAGE_BASE_URL: &str = "https://api.opencagedata.com";
pub const DEFAULT_TIMEZONE: Tz = Tz::Asia__Colombo;
pub const DEFAULT_DATASET_PATH: &str = "data/weather.csv";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the training and prediction stages.
///
/// # Examples
///
/// ```
/// use skycast::{ForecastConfig, ForestConfig};
///
/// let config = ForecastConfig::builder()
///     .dataset_path("history/weather.csv")
///     .forest(ForestConfig::builder().n_trees(50).build())
///     .build();
/// assert_eq!(config.holdout_ratio, 0.2);
/// assert_eq!(config.timezone, chrono_tz::Asia::Colombo);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ForecastConfig {
    /// CSV of historical daily records.
    #[builder(into, default = PathBuf::from(DEFAULT_DATASET_PATH))]
    pub dataset_path: PathBuf,
    /// Zone used to label the hourly forecast steps.
    #[builder(default = DEFAULT_TIMEZONE)]
    pub timezone: Tz,
    #[builder(default)]
    pub forest: ForestConfig,
    /// Share of rows held out to report the rain model's error.
    #[builder(default = DEFAULT_HOLDOUT_RATIO)]
    pub holdout_ratio: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig::builder().build()
    }
}

/// Connection settings for the OpenWeather current-conditions endpoint.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct OpenWeatherConfig {
    #[builder(into)]
    pub api_key: String,
    #[builder(into, default = DEFAULT_OPENWEATHER_BASE_URL.to_string())]
    pub base_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

/// Connection settings for IP geolocation and reverse geocoding.
///
/// Without an OpenCage key the city reported by the IP lookup itself is used.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GeolocationConfig {
    #[builder(into, default = DEFAULT_IP_LOOKUP_URL.to_string())]
    pub ip_lookup_url: String,
    #[builder(into)]
    pub opencage_api_key: Option<String>,
    #[builder(into, default = DEFAULT_OPENCAGE_BASE_URL.to_string())]
    pub opencage_base_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        GeolocationConfig::builder().build()
    }
}
