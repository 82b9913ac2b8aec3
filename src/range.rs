use crate::errors::AppError;
use crate::models::{RangeQuery, parse_date};
use chrono::NaiveDate;

/// Inclusive date window chosen in the sidebar picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolves the query against the dataset bounds. Missing ends default to
/// the bounds; dates outside them are clamped.
pub fn select_range(
    query: &RangeQuery,
    bounds: (NaiveDate, NaiveDate),
) -> Result<DateRange, AppError> {
    let (min_date, max_date) = bounds;
    let start = parse_param("start", query.start.as_deref())?
        .unwrap_or(min_date)
        .clamp(min_date, max_date);
    let end = parse_param("end", query.end.as_deref())?
        .unwrap_or(max_date)
        .clamp(min_date, max_date);

    if start > end {
        return Err(AppError::bad_request(format!(
            "start date {start} is after end date {end}"
        )));
    }

    Ok(DateRange { start, end })
}

fn parse_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .map_err(|_| AppError::bad_request(format!("{name} must be a YYYY-MM-DD date"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2012, 12, 31).unwrap(),
        )
    }

    fn query(start: Option<&str>, end: Option<&str>) -> RangeQuery {
        RangeQuery {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn default_range_is_full_dataset() {
        let range = select_range(&RangeQuery::default(), bounds()).unwrap();
        assert_eq!((range.start, range.end), bounds());
    }

    #[test]
    fn out_of_bounds_dates_are_clamped() {
        let range = select_range(&query(Some("2010-06-01"), Some("2013-01-01")), bounds()).unwrap();
        assert_eq!((range.start, range.end), bounds());

        let range = select_range(&query(Some("2012-02-01"), None), bounds()).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2012, 2, 1).unwrap());
        assert_eq!(range.end, bounds().1);
    }

    #[test]
    fn reversed_or_malformed_range_is_rejected() {
        let err = select_range(&query(Some("2012-05-01"), Some("2012-04-01")), bounds()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(select_range(&query(Some("yesterday"), None), bounds()).is_err());
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let day = NaiveDate::from_ymd_opt(2011, 3, 1).unwrap();
        let range = DateRange { start: day, end: day };
        assert!(range.contains(day));
        assert!(!range.contains(day.succ_opt().unwrap()));
        assert!(!range.contains(day.pred_opt().unwrap()));
    }
}
