//! Join-date parsing and years-of-service derivation.

use crate::utils::round_to;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order. Slash and dash forms are month-first.
const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y%m%d",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

const DAYS_PER_YEAR: f64 = 365.0;

/// Parse a join date from common textual layouts. Unrecognized text yields `None`.
pub fn parse_joining_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Whole days from `joined` to `reference` over 365, one decimal, never negative.
pub fn years_of_service(joined: NaiveDate, reference: NaiveDate) -> f64 {
    let days = (reference - joined).num_days().max(0);
    round_to(days as f64 / DAYS_PER_YEAR, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_joining_date("2020-01-01"), Some(date(2020, 1, 1)));
        assert_eq!(parse_joining_date(" 2019/07/15 "), Some(date(2019, 7, 15)));
    }

    #[test]
    fn test_parse_month_first() {
        assert_eq!(parse_joining_date("03/04/2021"), Some(date(2021, 3, 4)));
        assert_eq!(parse_joining_date("12-31-2018"), Some(date(2018, 12, 31)));
    }

    #[test]
    fn test_parse_named_month_and_datetime() {
        assert_eq!(parse_joining_date("5 Mar 2017"), Some(date(2017, 3, 5)));
        assert_eq!(parse_joining_date("March 5, 2017"), Some(date(2017, 3, 5)));
        assert_eq!(parse_joining_date("2017-03-05 09:30:00"), Some(date(2017, 3, 5)));
        assert_eq!(
            parse_joining_date("2017-03-05T09:30:00+05:30"),
            Some(date(2017, 3, 5))
        );
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse_joining_date(""), None);
        assert_eq!(parse_joining_date("not a date"), None);
        assert_eq!(parse_joining_date("2020-13-45"), None);
    }

    #[test]
    fn test_four_years_of_service() {
        let years = years_of_service(date(2020, 1, 1), date(2024, 1, 1));
        assert!((years - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_year_rounds_to_one_decimal() {
        // 182 days / 365 = 0.4986...
        assert_eq!(years_of_service(date(2023, 7, 3), date(2024, 1, 1)), 0.5);
    }

    #[test]
    fn test_future_join_date_clamps_to_zero() {
        assert_eq!(years_of_service(date(2025, 1, 1), date(2024, 1, 1)), 0.0);
    }

    #[test]
    fn test_join_date_days_ahead_is_positive_zero() {
        let years = years_of_service(date(2024, 1, 4), date(2024, 1, 1));
        assert_eq!(years, 0.0);
        assert!(years.is_sign_positive());
        assert_eq!(format!("{}", years), "0");
    }
}
