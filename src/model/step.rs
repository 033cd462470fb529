//! One-step-ahead regression over a single daily series.

use crate::historical::record::HistoricalRecord;
use crate::model::error::ModelError;
use crate::model::forest::{ForestConfig, RandomForestRegressor};
use crate::model::training_set::TrainingSet;
use log::debug;
use std::fmt;

/// Anything that maps today's value of a series to tomorrow's.
pub trait StepPredictor {
    fn predict_next(&self, current: f64) -> Result<f64, ModelError>;
}

impl<F> StepPredictor for F
where
    F: Fn(f64) -> f64,
{
    fn predict_next(&self, current: f64) -> Result<f64, ModelError> {
        Ok(self(current))
    }
}

/// Scalar series a [`StepModel`] can be trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesFeature {
    Temperature,
    Humidity,
}

impl SeriesFeature {
    pub fn value(self, record: &HistoricalRecord) -> f64 {
        match self {
            SeriesFeature::Temperature => record.temp,
            SeriesFeature::Humidity => record.humidity,
        }
    }
}

impl fmt::Display for SeriesFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesFeature::Temperature => f.write_str("temperature"),
            SeriesFeature::Humidity => f.write_str("humidity"),
        }
    }
}

/// Builds `(value[i], value[i + 1])` pairs for every adjacent index, in order.
pub fn consecutive_pairs(series: &[f64]) -> Vec<(f64, f64)> {
    series.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Forest regressor from one day's reading to the next day's.
#[derive(Debug, Clone)]
pub struct StepModel {
    feature: SeriesFeature,
    forest: RandomForestRegressor,
}

impl StepModel {
    /// Trains on every adjacent pair of `feature` in `records`, without a split or shuffle.
    ///
    /// # Errors
    ///
    /// [`ModelError::EmptyTrainingSet`] when fewer than two records are available.
    pub fn train(
        records: &[HistoricalRecord],
        feature: SeriesFeature,
        config: &ForestConfig,
    ) -> Result<Self, ModelError> {
        let series: Vec<f64> = records.iter().map(|r| feature.value(r)).collect();
        Self::train_on_series(&series, feature, config)
    }

    pub fn train_on_series(
        series: &[f64],
        feature: SeriesFeature,
        config: &ForestConfig,
    ) -> Result<Self, ModelError> {
        let (inputs, targets): (Vec<Vec<f64>>, Vec<f64>) = consecutive_pairs(series)
            .into_iter()
            .map(|(today, tomorrow)| (vec![today], tomorrow))
            .unzip();
        debug!("Training {feature} step model on {} pairs", targets.len());
        let data = TrainingSet::new(inputs, targets)?;
        let forest = RandomForestRegressor::fit(&data, config)?;
        Ok(Self { feature, forest })
    }

    pub fn feature(&self) -> SeriesFeature {
        self.feature
    }
}

impl StepPredictor for StepModel {
    fn predict_next(&self, current: f64) -> Result<f64, ModelError> {
        self.forest.predict(&[current])
    }
}
