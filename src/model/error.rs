use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Cannot fit a model on an empty training set")]
    EmptyTrainingSet,

    #[error("Training set has {features} feature rows but {targets} targets")]
    LengthMismatch { features: usize, targets: usize },

    #[error("Expected {expected} features per sample, found {found}")]
    FeatureWidth { expected: usize, found: usize },

    #[error("Training data contains a non-finite value at row {row}")]
    NonFiniteValue { row: usize },

    #[error("Invalid model configuration: {0}")]
    InvalidConfig(String),
}
