pub mod compass;
pub mod forecast_result;
pub mod snapshot;
