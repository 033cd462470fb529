//! Runs one complete forecast: city, live conditions, history, models, result.

use crate::clients::{CityLocator, WeatherProvider};
use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::forecast::trained::TrainedModels;
use crate::historical::error::DataError;
use crate::historical::loader::HistoricalDataLoader;
use crate::types::forecast_result::ForecastResult;
use crate::types::snapshot::CurrentWeatherSnapshot;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::info;

/// Loads the history, fits every model and predicts for `snapshot`.
///
/// An empty dataset is rejected as [`DataError::EmptyDataset`] before any model is
/// fitted.
pub fn forecast_from_snapshot(
    snapshot: &CurrentWeatherSnapshot,
    config: &ForecastConfig,
    now: &DateTime<Tz>,
) -> Result<ForecastResult, ForecastError> {
    let records = HistoricalDataLoader::new(&config.dataset_path).load()?;
    if records.is_empty() {
        return Err(DataError::EmptyDataset(config.dataset_path.clone()).into());
    }
    let models = TrainedModels::fit(&records, config)?;
    Ok(models.predict(snapshot, now)?)
}

/// Composes a weather provider and a city locator with the forecasting core.
///
/// Every call to [`Forecaster::forecast`] loads the dataset and trains the models
/// from scratch. No fitted state survives between calls.
///
/// # Examples
///
/// ```no_run
/// use skycast::{
///     ForecastConfig, Forecaster, GeolocationConfig, IpCityLocator, OpenWeatherClient,
///     OpenWeatherConfig,
/// };
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let weather = OpenWeatherClient::new(OpenWeatherConfig::builder().api_key("my-key").build())?;
/// let locator = IpCityLocator::new(GeolocationConfig::default())?;
/// let forecaster = Forecaster::new(weather, locator, ForecastConfig::default());
///
/// let result = forecaster.forecast(Some("Colombo")).await?;
/// println!("{} will rain: {}", result.current.city, result.will_rain);
/// # Ok(())
/// # }
/// ```
pub struct Forecaster<W, L> {
    weather: W,
    locator: L,
    config: ForecastConfig,
}

impl<W, L> Forecaster<W, L>
where
    W: WeatherProvider,
    L: CityLocator,
{
    pub fn new(weather: W, locator: L, config: ForecastConfig) -> Self {
        Self {
            weather,
            locator,
            config,
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecasts for `city`, or for the caller's location when `city` is absent or blank.
    pub async fn forecast(&self, city: Option<&str>) -> Result<ForecastResult, ForecastError> {
        let now = Utc::now().with_timezone(&self.config.timezone);
        self.forecast_at(city, &now).await
    }

    /// Same as [`Forecaster::forecast`] with an explicit "now".
    pub async fn forecast_at(
        &self,
        city: Option<&str>,
        now: &DateTime<Tz>,
    ) -> Result<ForecastResult, ForecastError> {
        let city = self.resolve_city(city).await?;
        let snapshot = self.weather.current_weather(&city).await?;
        info!(
            "Current weather in {}, {}: {}°C, {}",
            snapshot.city, snapshot.country, snapshot.current_temp, snapshot.description
        );
        let config = self.config.clone();
        let now = now.clone();
        tokio::task::spawn_blocking(move || forecast_from_snapshot(&snapshot, &config, &now))
            .await?
    }

    async fn resolve_city(&self, city: Option<&str>) -> Result<String, ForecastError> {
        if let Some(name) = city.map(str::trim).filter(|c| !c.is_empty()) {
            return Ok(name.to_string());
        }
        info!("No city given, locating caller");
        self.locator
            .locate_city()
            .await?
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(ForecastError::MissingCity)
    }
}
