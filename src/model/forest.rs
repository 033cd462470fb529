//! Bagged ensemble of [`RegressionTree`]s.

use crate::model::error::ModelError;
use crate::model::training_set::TrainingSet;
use crate::model::tree::{RegressionTree, TreeParams};
use bon::Builder;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_TREE_COUNT: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

/// Settings for [`RandomForestRegressor::fit`].
///
/// The defaults grow 100 unpruned trees on bootstrap samples with seed 42.
///
/// # Examples
///
/// ```
/// use skycast::ForestConfig;
///
/// let config = ForestConfig::builder().n_trees(25).seed(7).build();
/// assert_eq!(config.n_trees, 25);
/// assert_eq!(config.min_samples_leaf, 1);
/// assert_eq!(ForestConfig::default().n_trees, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct ForestConfig {
    #[builder(default = DEFAULT_TREE_COUNT)]
    pub n_trees: usize,
    #[builder(default = DEFAULT_SEED)]
    pub seed: u64,
    #[builder(default = 2)]
    pub min_samples_split: usize,
    #[builder(default = 1)]
    pub min_samples_leaf: usize,
    pub max_depth: Option<usize>,
    /// Draw each tree's rows with replacement. When `false` every tree sees the full set.
    #[builder(default = true)]
    pub bootstrap: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig::builder().build()
    }
}

impl ForestConfig {
    fn validate(&self) -> Result<(), ModelError> {
        if self.n_trees == 0 {
            return Err(ModelError::InvalidConfig(
                "a forest needs at least one tree".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::InvalidConfig(format!(
                "min_samples_split must be at least 2, got {}",
                self.min_samples_split
            )));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidConfig(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
        }
    }
}

/// Averages the predictions of independently grown regression trees.
///
/// Fitting is deterministic: the same data and [`ForestConfig`] always produce the
/// same trees, and so the same predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForestRegressor {
    pub fn fit(data: &TrainingSet, config: &ForestConfig) -> Result<Self, ModelError> {
        config.validate()?;
        if data.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let n = data.len();
        let params = config.tree_params();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let all_rows: Vec<usize> = (0..n).collect();

        let trees: Vec<RegressionTree> = (0..config.n_trees)
            .map(|_| {
                let tree_seed: u64 = rng.gen();
                if config.bootstrap {
                    let mut tree_rng = ChaCha8Rng::seed_from_u64(tree_seed);
                    let sample: Vec<usize> = (0..n).map(|_| tree_rng.gen_range(0..n)).collect();
                    RegressionTree::fit(data, &sample, &params)
                } else {
                    RegressionTree::fit(data, &all_rows, &params)
                }
            })
            .collect();

        debug!(
            "Fitted random forest: {} trees, {} samples, {} features, {} nodes total",
            trees.len(),
            n,
            data.width(),
            trees.iter().map(RegressionTree::node_count).sum::<usize>()
        );

        Ok(Self {
            trees,
            n_features: data.width(),
        })
    }

    /// Mean of all tree outputs for one sample.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureWidth {
                expected: self.n_features,
                found: features.len(),
            });
        }
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        Ok(total / self.trees.len() as f64)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

/// Mean squared error between paired predictions and targets; `None` for empty input.
pub fn mean_squared_error(predictions: &[f64], targets: &[f64]) -> Option<f64> {
    if predictions.is_empty() || predictions.len() != targets.len() {
        return None;
    }
    let sum: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(p, t)| (p - t).powi(2))
        .sum();
    Some(sum / predictions.len() as f64)
}
