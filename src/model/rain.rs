//! Next-day rain likelihood.
//!
//! A forest regressor is fitted against the encoded `rain_tomorrow` label as a
//! numeric target. With labels sorted `No` < `Yes` the score reads as the share of
//! similar past days that were followed by rain.

use crate::encoding::category_encoder::CategoryCode;
use crate::encoding::encoded_dataset::{EncodedDataset, EncodedRecord};
use crate::model::error::ModelError;
use crate::model::forest::{mean_squared_error, ForestConfig, RandomForestRegressor};
use crate::model::training_set::TrainingSet;
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Share of the data held out to report the rain model's error.
pub const DEFAULT_HOLDOUT_RATIO: f64 = 0.2;

/// Probability (in percent) above which rain is expected.
pub const RAIN_THRESHOLD_PERCENT: u8 = 50;

/// The seven inputs of the rain model, in training column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainFeatures {
    pub min_temp: f64,
    pub max_temp: f64,
    pub wind_gust_dir: CategoryCode,
    pub wind_gust_speed: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub temp: f64,
}

impl RainFeatures {
    pub const WIDTH: usize = 7;

    pub fn to_vector(&self) -> [f64; Self::WIDTH] {
        [
            self.min_temp,
            self.max_temp,
            self.wind_gust_dir.as_feature(),
            self.wind_gust_speed,
            self.humidity,
            self.pressure,
            self.temp,
        ]
    }
}

impl From<&EncodedRecord> for RainFeatures {
    fn from(record: &EncodedRecord) -> Self {
        Self {
            min_temp: record.min_temp,
            max_temp: record.max_temp,
            wind_gust_dir: CategoryCode::Known(record.wind_gust_dir),
            wind_gust_speed: record.wind_gust_speed,
            humidity: record.humidity,
            pressure: record.pressure,
            temp: record.temp,
        }
    }
}

/// Shuffles row indices with `seed` and splits them into `(train, holdout)`.
///
/// The holdout receives `ceil(n * ratio)` rows; the training part keeps the rest.
pub fn holdout_split(n: usize, ratio: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>), ModelError> {
    if !(0.0..1.0).contains(&ratio) {
        return Err(ModelError::InvalidConfig(format!(
            "holdout ratio must be in [0, 1), got {ratio}"
        )));
    }
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

    let holdout_len = ((n as f64) * ratio).ceil() as usize;
    let train = indices.split_off(holdout_len.min(n));
    Ok((train, indices))
}

/// Fitted rain-likelihood regressor plus its holdout diagnostic.
#[derive(Debug, Clone)]
pub struct RainModel {
    forest: RandomForestRegressor,
    holdout_mse: Option<f64>,
}

impl RainModel {
    /// Fits on a seeded train split and measures squared error on the holdout.
    ///
    /// The error is informational only; the fitted model is returned whatever it is.
    pub fn train(
        dataset: &EncodedDataset,
        forest_config: &ForestConfig,
        holdout_ratio: f64,
    ) -> Result<Self, ModelError> {
        let records = dataset.records();
        let (train_rows, holdout_rows) =
            holdout_split(records.len(), holdout_ratio, forest_config.seed)?;
        if train_rows.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let features: Vec<Vec<f64>> = records
            .iter()
            .map(|r| RainFeatures::from(r).to_vector().to_vec())
            .collect();
        let targets: Vec<f64> = records.iter().map(|r| f64::from(r.rain_tomorrow)).collect();
        let all = TrainingSet::new(features, targets)?;

        let forest = RandomForestRegressor::fit(&all.subset(&train_rows)?, forest_config)?;

        let holdout_mse = if holdout_rows.is_empty() {
            warn!("Rain model trained without a holdout set; no error estimate available");
            None
        } else {
            let predictions = holdout_rows
                .iter()
                .map(|&i| forest.predict(all.row(i)))
                .collect::<Result<Vec<f64>, _>>()?;
            let expected: Vec<f64> = holdout_rows.iter().map(|&i| all.targets()[i]).collect();
            mean_squared_error(&predictions, &expected)
        };
        if let Some(mse) = holdout_mse {
            info!(
                "Mean squared error for rain model: {mse} ({} train / {} holdout rows)",
                train_rows.len(),
                holdout_rows.len()
            );
        }

        Ok(Self {
            forest,
            holdout_mse,
        })
    }

    /// Raw regression score, nominally in `[0, 1]`.
    pub fn predict(&self, features: &RainFeatures) -> Result<f64, ModelError> {
        self.forest.predict(&features.to_vector())
    }

    pub fn holdout_mse(&self) -> Option<f64> {
        self.holdout_mse
    }
}

/// Rain score turned into a percentage and a yes/no summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainOutlook {
    pub probability: u8,
    pub will_rain: bool,
}

impl RainOutlook {
    /// Scales `score` to a percentage, rounds, and clamps it into `0..=100`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skycast::RainOutlook;
    ///
    /// assert_eq!(RainOutlook::from_score(0.734).probability, 73);
    /// assert!(RainOutlook::from_score(0.734).will_rain);
    /// assert_eq!(RainOutlook::from_score(1.8).probability, 100);
    /// assert_eq!(RainOutlook::from_score(-0.2).probability, 0);
    /// assert!(!RainOutlook::from_score(0.5).will_rain);
    /// ```
    pub fn from_score(score: f64) -> Self {
        let percent = if score.is_nan() {
            0.0
        } else {
            (score * 100.0).round().clamp(0.0, 100.0)
        };
        let probability = percent as u8;
        Self {
            probability,
            will_rain: probability > RAIN_THRESHOLD_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::historical::record::HistoricalRecord;

    fn history(n: usize) -> Vec<HistoricalRecord> {
        (0..n)
            .map(|i| {
                let humid = i % 3 == 0;
                HistoricalRecord {
                    min_temp: 10.0 + (i % 7) as f64,
                    max_temp: 20.0 + (i % 5) as f64,
                    wind_gust_dir: ["N", "SSW", "E", "WNW"][i % 4].to_string(),
                    wind_gust_speed: 30.0 + (i % 9) as f64,
                    humidity: if humid { 85.0 + (i % 4) as f64 } else { 35.0 + (i % 6) as f64 },
                    pressure: 1005.0 + (i % 11) as f64,
                    temp: 18.0 + (i % 6) as f64,
                    rain_tomorrow: if humid { "Yes" } else { "No" }.to_string(),
                }
            })
            .collect()
    }

    #[test]
    fn test_holdout_split_sizes_and_coverage() -> Result<(), ModelError> {
        let (train, holdout) = holdout_split(11, 0.2, 42)?;

        assert_eq!(holdout.len(), 3);
        assert_eq!(train.len(), 8);
        let mut all: Vec<usize> = train.iter().chain(&holdout).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..11).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_holdout_split_is_seeded() -> Result<(), ModelError> {
        assert_eq!(holdout_split(50, 0.2, 42)?, holdout_split(50, 0.2, 42)?);
        assert_ne!(holdout_split(50, 0.2, 42)?, holdout_split(50, 0.2, 43)?);
        Ok(())
    }

    #[test]
    fn test_single_row_cannot_be_trained() {
        let dataset = EncodedDataset::encode(&history(1));
        let result = RainModel::train(&dataset, &ForestConfig::default(), DEFAULT_HOLDOUT_RATIO);

        assert!(matches!(result, Err(ModelError::EmptyTrainingSet)));
    }

    #[test]
    fn test_rain_model_separates_humid_days() -> Result<(), ModelError> {
        let dataset = EncodedDataset::encode(&history(60));
        let model = RainModel::train(&dataset, &ForestConfig::default(), DEFAULT_HOLDOUT_RATIO)?;

        let mut features = RainFeatures::from(&dataset.records()[0]);
        features.humidity = 87.0;
        let humid = model.predict(&features)?;
        features.humidity = 37.0;
        let dry = model.predict(&features)?;

        assert!(humid > dry);
        assert!(model.holdout_mse().is_some_and(|mse| mse < 0.25));
        Ok(())
    }

    #[test]
    fn test_rain_model_is_deterministic() -> Result<(), ModelError> {
        let dataset = EncodedDataset::encode(&history(40));
        let config = ForestConfig::default();
        let first = RainModel::train(&dataset, &config, DEFAULT_HOLDOUT_RATIO)?;
        let second = RainModel::train(&dataset, &config, DEFAULT_HOLDOUT_RATIO)?;

        for record in dataset.records() {
            let features = RainFeatures::from(record);
            assert_eq!(first.predict(&features)?, second.predict(&features)?);
        }
        assert_eq!(first.holdout_mse(), second.holdout_mse());
        Ok(())
    }

    #[test]
    fn test_unknown_direction_still_predicts() -> Result<(), ModelError> {
        let dataset = EncodedDataset::encode(&history(30));
        let model = RainModel::train(&dataset, &ForestConfig::default(), DEFAULT_HOLDOUT_RATIO)?;
        let mut features = RainFeatures::from(&dataset.records()[3]);
        features.wind_gust_dir = CategoryCode::Unknown;

        let score = model.predict(&features)?;
        assert!((0.0..=1.0).contains(&score));
        Ok(())
    }

    #[test]
    fn test_outlook_probability_always_in_range() {
        for score in [-5.0, -0.01, 0.0, 0.004, 0.505, 0.51, 0.999, 1.0, 3.5, f64::NAN, f64::INFINITY] {
            let outlook = RainOutlook::from_score(score);
            assert!(outlook.probability <= 100, "score {score}");
            assert_eq!(outlook.will_rain, outlook.probability > 50);
        }
        assert_eq!(RainOutlook::from_score(0.51).probability, 51);
        assert!(RainOutlook::from_score(0.51).will_rain);
        assert_eq!(RainOutlook::from_score(f64::INFINITY).probability, 100);
    }
}
