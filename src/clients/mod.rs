//! Collaborators outside the forecasting core: live conditions and city lookup.

use crate::types::snapshot::CurrentWeatherSnapshot;
use std::future::Future;

pub mod error;
pub mod location;
pub mod open_weather;

use error::WeatherApiError;

/// Source of current conditions for a named city.
pub trait WeatherProvider {
    fn current_weather(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<CurrentWeatherSnapshot, WeatherApiError>> + Send;
}

/// Finds the city the caller is in, when none was given explicitly.
///
/// `Ok(None)` means the lookup worked but produced no usable city name.
pub trait CityLocator {
    fn locate_city(&self) -> impl Future<Output = Result<Option<String>, WeatherApiError>> + Send;
}
