use crate::config::Config;
use crate::errors::DataError;
use crate::models::{DailyRecord, Dataset, HourlyRecord, RawDayRow, RawHourRow};
use serde::de::DeserializeOwned;
use std::{fmt, path::PathBuf};
use tokio::fs;
use tracing::info;

/// Where a record set comes from: an HTTP(S) URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(String),
    Local(PathBuf),
}

impl DataSource {
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Remote(location.to_string())
        } else {
            DataSource::Local(PathBuf::from(location))
        }
    }

    pub async fn fetch(&self) -> Result<String, DataError> {
        match self {
            DataSource::Remote(url) => {
                let fetch_err = |error| DataError::Fetch {
                    source_name: url.clone(),
                    error,
                };
                let response = reqwest::get(url)
                    .await
                    .and_then(|resp| resp.error_for_status())
                    .map_err(fetch_err)?;
                response.text().await.map_err(fetch_err)
            }
            DataSource::Local(path) => {
                fs::read_to_string(path)
                    .await
                    .map_err(|error| DataError::Io {
                        source_name: path.display().to_string(),
                        error,
                    })
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Remote(url) => f.write_str(url),
            DataSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and parses both record sets. Runs once at startup.
pub async fn load_dataset(config: &Config) -> Result<Dataset, DataError> {
    let day_text = config.day_source.fetch().await?;
    let daily = parse_daily(&day_text)?;
    if daily.is_empty() {
        return Err(DataError::Empty(config.day_source.to_string()));
    }

    let hour_text = config.hour_source.fetch().await?;
    let hourly = parse_hourly(&hour_text)?;

    info!(
        daily = daily.len(),
        hourly = hourly.len(),
        "bike sharing records loaded"
    );
    Ok(Dataset { daily, hourly })
}

/// Parses `day.csv` content and sorts the records by date.
pub fn parse_daily(text: &str) -> Result<Vec<DailyRecord>, DataError> {
    let mut records = parse_rows::<RawDayRow, _>(text, RawDayRow::into_record)?;
    records.sort_by_key(|record| record.date);
    Ok(records)
}

pub fn parse_hourly(text: &str) -> Result<Vec<HourlyRecord>, DataError> {
    parse_rows::<RawHourRow, _>(text, RawHourRow::into_record)
}

fn parse_rows<R, T>(
    text: &str,
    convert: impl Fn(R) -> Result<T, DataError>,
) -> Result<Vec<T>, DataError>
where
    R: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    while reader.read_record(&mut row)? {
        // line where the record starts; quoted fields may span several
        let line = row.position().map_or(0, |position| position.line());
        let raw: R = row.deserialize(Some(&headers))?;
        let record = convert(raw).map_err(|err| DataError::InvalidRow {
            line,
            message: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}
