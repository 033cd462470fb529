use crate::clients::error::WeatherApiError;
use crate::historical::error::DataError;
use crate::model::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Weather(#[from] WeatherApiError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("No city given and none could be determined from the current location")]
    MissingCity,

    #[error("Unknown time zone '{0}'")]
    InvalidTimezone(String),

    #[error("Forecast task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("No OpenWeather API key configured (set OPENWEATHER_API_KEY or pass --openweather-key)")]
    MissingApiKey,

    #[error("Failed to serialize forecast")]
    Serialize(#[from] serde_json::Error),
}

impl ForecastError {
    /// The requested city is unknown to the weather provider.
    pub fn is_lookup(&self) -> bool {
        matches!(self, ForecastError::Weather(e) if e.is_lookup())
    }

    /// The weather provider or locator could not be reached, or refused the request.
    pub fn is_network(&self) -> bool {
        matches!(self, ForecastError::Weather(e) if e.is_network())
    }
}
