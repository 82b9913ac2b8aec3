use crate::errors::DataError;
use crate::loader::DataSource;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DAY_SOURCE: &str =
    "https://raw.githubusercontent.com/yocimm/bike_sharing_dashboard/master/data/day.csv";
pub const DEFAULT_HOUR_SOURCE: &str =
    "https://raw.githubusercontent.com/yocimm/bike_sharing_dashboard/master/data/hour.csv";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub day_source: DataSource,
    pub hour_source: DataSource,
}

impl Config {
    /// Reads `PORT`, `BIKE_DAY_SOURCE` and `BIKE_HOUR_SOURCE`, falling back
    /// to port 8080 and the public dataset URLs.
    pub fn from_env() -> Result<Self, DataError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DataError> {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|err| DataError::Config(format!("invalid PORT '{value}': {err}")))?,
            None => DEFAULT_PORT,
        };
        let day_source = lookup("BIKE_DAY_SOURCE").unwrap_or_else(|| DEFAULT_DAY_SOURCE.to_string());
        let hour_source =
            lookup("BIKE_HOUR_SOURCE").unwrap_or_else(|| DEFAULT_HOUR_SOURCE.to_string());

        Ok(Self {
            port,
            day_source: DataSource::parse(&day_source),
            hour_source: DataSource::parse(&hour_source),
        })
    }

    pub fn log_config(&self) {
        info!("configuration loaded:");
        info!("  PORT             : {}", self.port);
        info!("  BIKE_DAY_SOURCE  : {}", self.day_source);
        info!("  BIKE_HOUR_SOURCE : {}", self.hour_source);
    }
}

/// Log filter from `RUST_LOG`, or `info` when it is unset or unparseable.
pub fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
