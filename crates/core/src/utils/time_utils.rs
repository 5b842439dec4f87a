use chrono::{DateTime, Datelike, Local, NaiveDate};

use crate::errors::{Error, Result};

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, and full RFC 3339 timestamps whose date part is used.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Parses an optional date parameter, treating an empty string as absent.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value {
        Some(raw) if !raw.is_empty() => parse_date(raw).map(Some),
        _ => Ok(None),
    }
}

/// Absolute number of whole days between two dates.
pub fn days_between(first: NaiveDate, second: NaiveDate) -> i64 {
    (second - first).num_days().abs()
}

/// First and last day (both inclusive) of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let next_month_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month_first
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);
    (first, last)
}

/// Today's date in the local calendar.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_plain_and_rfc3339_dates() {
        assert_eq!(parse_date("2024-01-15").unwrap(), d("2024-01-15"));
        assert_eq!(parse_date("2024-01-15T10:30:00Z").unwrap(), d("2024-01-15"));
    }

    #[test]
    fn malformed_dates_fail_with_invalid_date() {
        for bad in ["15/01/2024", "2024-13-01", "yesterday"] {
            assert!(matches!(parse_date(bad), Err(Error::InvalidDate(_))), "{bad}");
        }
    }

    #[test]
    fn empty_optional_date_is_absent() {
        assert_eq!(parse_optional_date(Some("")).unwrap(), None);
        assert_eq!(parse_optional_date(None).unwrap(), None);
    }

    #[test]
    fn days_between_is_symmetric() {
        assert_eq!(days_between(d("2024-01-01"), d("2024-03-01")), 60);
        assert_eq!(days_between(d("2024-03-01"), d("2024-01-01")), 60);
        assert_eq!(days_between(d("2024-03-01"), d("2024-03-01")), 0);
    }

    #[test]
    fn month_bounds_cover_whole_month() {
        assert_eq!(month_bounds(d("2024-02-14")), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(month_bounds(d("2023-12-31")), (d("2023-12-01"), d("2023-12-31")));
        assert_eq!(month_bounds(d("2025-04-01")), (d("2025-04-01"), d("2025-04-30")));
    }
}
