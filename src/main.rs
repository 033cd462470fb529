//! Command line forecaster: prints the forecast for a city as JSON on stdout.

use clap::Parser;
use env_logger::Env;
use log::error;
use serde_json::json;
use skycast::{
    ForecastConfig, ForecastError, Forecaster, ForestConfig, GeolocationConfig, IpCityLocator,
    OpenWeatherClient, OpenWeatherConfig, DEFAULT_DATASET_PATH, DEFAULT_IP_LOOKUP_URL,
    DEFAULT_OPENCAGE_BASE_URL, DEFAULT_OPENWEATHER_BASE_URL, DEFAULT_SEED, DEFAULT_TREE_COUNT,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rain likelihood and a five-hour outlook for a city", long_about = None)]
struct Args {
    /// City to forecast; located from the public IP address when omitted
    city: Option<String>,

    /// Historical daily records (CSV)
    #[arg(long, env = "SKYCAST_DATA", default_value = DEFAULT_DATASET_PATH)]
    data: PathBuf,

    /// IANA zone for the hourly labels
    #[arg(long, env = "SKYCAST_TIMEZONE", default_value = "Asia/Colombo")]
    timezone: String,

    /// Trees per forest
    #[arg(long, default_value_t = DEFAULT_TREE_COUNT)]
    trees: usize,

    /// Seed for bootstrap sampling and the holdout split
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    openweather_key: Option<String>,

    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_OPENWEATHER_BASE_URL)]
    openweather_url: String,

    /// Enables reverse geocoding of the IP position
    #[arg(long, env = "OPENCAGE_API_KEY", hide_env_values = true)]
    opencage_key: Option<String>,

    #[arg(long, env = "OPENCAGE_BASE_URL", default_value = DEFAULT_OPENCAGE_BASE_URL)]
    opencage_url: String,

    #[arg(long, env = "SKYCAST_IP_LOOKUP_URL", default_value = DEFAULT_IP_LOOKUP_URL)]
    ip_lookup_url: String,
}

async fn run(args: Args) -> Result<String, ForecastError> {
    let api_key = args
        .openweather_key
        .filter(|key| !key.trim().is_empty())
        .ok_or(ForecastError::MissingApiKey)?;
    let timezone = args
        .timezone
        .parse::<chrono_tz::Tz>()
        .map_err(|_| ForecastError::InvalidTimezone(args.timezone.clone()))?;
    let config = ForecastConfig::builder()
        .dataset_path(args.data)
        .timezone(timezone)
        .forest(ForestConfig::builder().n_trees(args.trees).seed(args.seed).build())
        .build();

    let weather = OpenWeatherClient::new(
        OpenWeatherConfig::builder()
            .api_key(api_key)
            .base_url(args.openweather_url)
            .build(),
    )?;
    let locator = IpCityLocator::new(
        GeolocationConfig::builder()
            .ip_lookup_url(args.ip_lookup_url)
            .maybe_opencage_api_key(args.opencage_key)
            .opencage_base_url(args.opencage_url)
            .build(),
    )?;

    let result = Forecaster::new(weather, locator, config)
        .forecast(args.city.as_deref())
        .await?;
    Ok(serde_json::to_string_pretty(&result)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run(Args::parse()).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:?}");
            println!("{}", json!({ "error": e.to_string() }));
            ExitCode::FAILURE
        }
    }
}
