use polars::error::PolarsError;
use polars::prelude::DataType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Historical dataset '{0}' could not be read")]
    Unreadable(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse historical CSV '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{column}' not found in historical dataset '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' has type {found} but a numeric column was expected")]
    NonNumericColumn { column: String, found: DataType },

    #[error("Failed processing column '{column}'")]
    ColumnProcessing {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Historical dataset '{0}' has no usable rows after cleaning")]
    EmptyDataset(PathBuf),
}
