mod clients;
mod config;
mod encoding;
mod error;
mod forecast;
mod historical;
mod model;
mod types;

pub use config::*;
pub use error::ForecastError;

pub use clients::error::WeatherApiError;
pub use clients::location::IpCityLocator;
pub use clients::open_weather::OpenWeatherClient;
pub use clients::{CityLocator, WeatherProvider};

pub use encoding::category_encoder::{CategoryCode, CategoryEncoder};
pub use encoding::encoded_dataset::{CategoricalColumn, EncodedDataset, EncodedRecord};

pub use forecast::forecaster::{forecast_from_snapshot, Forecaster};
pub use forecast::iterative::{iterative_forecast, FORECAST_STEPS};
pub use forecast::timeline::hourly_labels;
pub use forecast::trained::TrainedModels;

pub use historical::error::DataError;
pub use historical::loader::{deduplicate, load_historical, HistoricalDataLoader};
pub use historical::record::HistoricalRecord;

pub use model::error::ModelError;
pub use model::forest::{
    mean_squared_error, ForestConfig, RandomForestRegressor, DEFAULT_SEED, DEFAULT_TREE_COUNT,
};
pub use model::rain::{
    holdout_split, RainFeatures, RainModel, RainOutlook, DEFAULT_HOLDOUT_RATIO, RAIN_THRESHOLD_PERCENT,
};
pub use model::step::{consecutive_pairs, SeriesFeature, StepModel, StepPredictor};
pub use model::training_set::TrainingSet;

pub use types::compass::{CompassPoint, UnknownCompassLabel};
pub use types::forecast_result::{ForecastResult, FutureForecast};
pub use types::snapshot::CurrentWeatherSnapshot;
