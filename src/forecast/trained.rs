//! The models fitted for one run, and prediction against a live snapshot.

use crate::config::ForecastConfig;
use crate::encoding::category_encoder::{CategoryCode, CategoryEncoder};
use crate::encoding::encoded_dataset::{CategoricalColumn, EncodedDataset};
use crate::forecast::iterative::{iterative_forecast, FORECAST_STEPS};
use crate::forecast::timeline::hourly_labels;
use crate::historical::record::HistoricalRecord;
use crate::model::error::ModelError;
use crate::model::rain::{RainFeatures, RainModel, RainOutlook};
use crate::model::step::{SeriesFeature, StepModel};
use crate::types::compass::CompassPoint;
use crate::types::forecast_result::{ForecastResult, FutureForecast};
use crate::types::snapshot::CurrentWeatherSnapshot;
use chrono::DateTime;
use chrono_tz::Tz;
use log::{info, warn};

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Encoder, rain model and both step models fitted on one historical dataset.
///
/// [`Forecaster`](crate::Forecaster) fits a fresh bundle on every call. A caller
/// that forecasts many times against the same history can fit once with
/// [`TrainedModels::fit`] and call [`TrainedModels::predict`] repeatedly.
#[derive(Debug, Clone)]
pub struct TrainedModels {
    wind_encoder: CategoryEncoder,
    rain: RainModel,
    temperature: StepModel,
    humidity: StepModel,
}

impl TrainedModels {
    pub fn fit(records: &[HistoricalRecord], config: &ForecastConfig) -> Result<Self, ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        let dataset = EncodedDataset::encode(records);
        info!(
            "Encoded {} rows ({} wind directions, {} rain labels)",
            dataset.len(),
            dataset.encoder(CategoricalColumn::WindGustDir).len(),
            dataset.encoder(CategoricalColumn::RainTomorrow).len()
        );

        let rain = RainModel::train(&dataset, &config.forest, config.holdout_ratio)?;
        let temperature = StepModel::train(records, SeriesFeature::Temperature, &config.forest)?;
        let humidity = StepModel::train(records, SeriesFeature::Humidity, &config.forest)?;

        Ok(Self {
            wind_encoder: dataset.encoder(CategoricalColumn::WindGustDir).clone(),
            rain,
            temperature,
            humidity,
        })
    }

    pub fn rain_model(&self) -> &RainModel {
        &self.rain
    }

    pub fn wind_encoder(&self) -> &CategoryEncoder {
        &self.wind_encoder
    }

    /// Combines `snapshot` with the fitted models into a full forecast.
    ///
    /// `now` fixes both the hour labels and the zone they are written in.
    pub fn predict(
        &self,
        snapshot: &CurrentWeatherSnapshot,
        now: &DateTime<Tz>,
    ) -> Result<ForecastResult, ModelError> {
        let wind_direction = CompassPoint::from_degrees(i64::from(snapshot.wind_gust_dir));
        let wind_direction_code = self.wind_encoder.encode(wind_direction.label());
        if wind_direction_code == CategoryCode::Unknown {
            warn!(
                "Wind direction {} never appeared in the historical data; predicting with an unknown code",
                wind_direction
            );
        }

        let features = RainFeatures {
            min_temp: f64::from(snapshot.temp_min),
            max_temp: f64::from(snapshot.temp_max),
            wind_gust_dir: wind_direction_code,
            wind_gust_speed: snapshot.wind_gust_speed,
            humidity: f64::from(snapshot.humidity),
            pressure: f64::from(snapshot.pressure),
            temp: f64::from(snapshot.current_temp),
        };
        let outlook = RainOutlook::from_score(self.rain.predict(&features)?);

        let temperature = iterative_forecast(&self.temperature, f64::from(snapshot.temp_min))?;
        let humidity = iterative_forecast(&self.humidity, f64::from(snapshot.humidity))?;

        Ok(ForecastResult {
            current: snapshot.clone(),
            wind_direction,
            wind_direction_code,
            rain_probability: outlook.probability,
            will_rain: outlook.will_rain,
            future_forecast: FutureForecast {
                times: hourly_labels(now, FORECAST_STEPS),
                temperature: temperature.into_iter().map(one_decimal).collect(),
                humidity: humidity.into_iter().map(one_decimal).collect(),
            },
        })
    }
}
