use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("City '{0}' was not found by the weather provider")]
    CityNotFound(String),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl WeatherApiError {
    /// The provider could not be reached or answered with a failure status.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            WeatherApiError::NetworkRequest(..) | WeatherApiError::HttpStatus { .. }
        )
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, WeatherApiError::CityNotFound(_))
    }
}
