use crate::categories::{DayCategories, DayOfWeek, Season, categorize_day};
use crate::errors::DataError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row of `day.csv` as it appears on disk.
#[derive(Debug, Deserialize)]
pub struct RawDayRow {
    pub dteday: String,
    pub season: u8,
    pub holiday: u8,
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

/// One row of `hour.csv`; the daily columns plus the hour of day.
#[derive(Debug, Deserialize)]
pub struct RawHourRow {
    pub dteday: String,
    pub season: u8,
    pub hr: u8,
    pub holiday: u8,
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub holiday: bool,
    pub weekday: DayOfWeek,
    pub working_day: bool,
    pub temp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
    pub categories: DayCategories,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub day: DailyRecord,
    pub hour: u8,
}

impl RawDayRow {
    pub fn into_record(self) -> Result<DailyRecord, DataError> {
        let date = parse_date(&self.dteday)?;
        let categories = categorize_day(self.temp, self.hum, self.windspeed, self.weathersit)?;
        Ok(DailyRecord {
            date,
            season: Season::from_code(self.season)?,
            holiday: parse_flag("holiday", self.holiday)?,
            weekday: DayOfWeek::from_code(self.weekday)?,
            working_day: parse_flag("workingday", self.workingday)?,
            temp: self.temp,
            hum: self.hum,
            windspeed: self.windspeed,
            casual: self.casual,
            registered: self.registered,
            cnt: self.cnt,
            categories,
        })
    }
}

impl RawHourRow {
    pub fn into_record(self) -> Result<HourlyRecord, DataError> {
        if self.hr > 23 {
            return Err(DataError::code("hr", self.hr));
        }
        let hour = self.hr;
        let day = RawDayRow {
            dteday: self.dteday,
            season: self.season,
            holiday: self.holiday,
            weekday: self.weekday,
            workingday: self.workingday,
            weathersit: self.weathersit,
            temp: self.temp,
            hum: self.hum,
            windspeed: self.windspeed,
            casual: self.casual,
            registered: self.registered,
            cnt: self.cnt,
        };
        Ok(HourlyRecord {
            day: day.into_record()?,
            hour,
        })
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DataError::InvalidDate(value.to_string()))
}

fn parse_flag(field: &'static str, value: u8) -> Result<bool, DataError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(DataError::code(field, other)),
    }
}

/// Both record sets, loaded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    /// First and last date of the daily set. The loader rejects an empty set
    /// and sorts it, so both ends exist.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.daily.first()?.date;
        let last = self.daily.last()?.date;
        Some((first, last))
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeResponse {
    pub min_date: String,
    pub max_date: String,
    pub daily_records: usize,
    pub hourly_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedRange {
    pub start: String,
    pub end: String,
    pub min_date: String,
    pub max_date: String,
    pub days_selected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderTotals {
    pub registered: u64,
    pub casual: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub key: u8,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: String,
    pub points: Vec<BarPoint>,
    pub highlight: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    pub offset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSeries {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountBar {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<CountBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPanels {
    pub temperature: CountPlot,
    pub humidity: CountPlot,
    pub wind: CountPlot,
    pub weather: CountPlot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub range: SelectedRange,
    pub totals: RiderTotals,
    pub by_weekday: BarSeries,
    pub by_hour: BarSeries,
    pub by_holiday: PieSeries,
    pub by_season: PieSeries,
    pub by_working_day: BarSeries,
    pub conditions: WeatherPanels,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_day() -> RawDayRow {
        RawDayRow {
            dteday: "2011-01-01".to_string(),
            season: 1,
            holiday: 0,
            weekday: 6,
            workingday: 0,
            weathersit: 2,
            temp: 0.344167,
            hum: 0.805833,
            windspeed: 0.160446,
            casual: 331,
            registered: 654,
            cnt: 985,
        }
    }

    #[test]
    fn raw_day_converts_with_categories() {
        let record = raw_day().into_record().unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(record.season, Season::Springer);
        assert_eq!(record.weekday, DayOfWeek::Saturday);
        assert!(!record.holiday);
        assert_eq!(
            record.categories.labels(),
            ("Sejuk", "Lembap", "Tenang", "Berawan/Berkabut")
        );
    }

    #[test]
    fn raw_day_rejects_bad_date_and_codes() {
        let mut row = raw_day();
        row.dteday = "01/01/2011".to_string();
        assert!(matches!(row.into_record(), Err(DataError::InvalidDate(_))));

        let mut row = raw_day();
        row.holiday = 2;
        assert!(matches!(
            row.into_record(),
            Err(DataError::InvalidCode { field: "holiday", value: 2 })
        ));

        let mut row = raw_day();
        row.weathersit = 5;
        assert!(row.into_record().is_err());
    }

    #[test]
    fn raw_hour_rejects_hour_past_23() {
        let day = raw_day();
        let row = RawHourRow {
            dteday: day.dteday,
            season: day.season,
            hr: 24,
            holiday: day.holiday,
            weekday: day.weekday,
            workingday: day.workingday,
            weathersit: day.weathersit,
            temp: day.temp,
            hum: day.hum,
            windspeed: day.windspeed,
            casual: day.casual,
            registered: day.registered,
            cnt: day.cnt,
        };
        assert!(matches!(
            row.into_record(),
            Err(DataError::InvalidCode { field: "hr", value: 24 })
        ));
    }
}
