use crate::utils::constants::{DATETIME_FORMATS, DATE_FORMATS, WORKDAY_NAMES};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Weekday};

/// Parse a date cell, returning `None` instead of failing on unknown layouts
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .or_else(|| value.parse::<NaiveDateTime>().ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn month_name(date: NaiveDate) -> &'static str {
    match date.month() {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

/// 1 for Monday through Friday, 0 otherwise (including an unknown day)
pub fn weekday_flag(day_of_week_name: Option<&str>) -> u8 {
    match day_of_week_name {
        Some(name) if WORKDAY_NAMES.contains(&name) => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2011, 1, 5);

        assert_eq!(parse_date("2011-01-05"), expected);
        assert_eq!(parse_date(" 2011/01/05 "), expected);
        assert_eq!(parse_date("01/05/2011"), expected);
        assert_eq!(parse_date("2011-01-05 13:45:00"), expected);
    }

    #[test]
    fn test_parse_date_iso_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2011, 1, 5);

        assert_eq!(parse_date("2011-01-05T00:00:00"), expected);
        assert_eq!(parse_date("2011-01-05T08:30:15.250"), expected);
        assert_eq!(parse_date("2011-01-05T23:00:00Z"), expected);
        assert_eq!(parse_date("2011-01-05T23:00:00+01:00"), expected);
        assert_eq!(parse_date("2011-01-05T25:00:00"), None);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2011-02-30"), None);
    }

    #[test]
    fn test_names() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 5).unwrap();
        assert_eq!(day_name(date), "Wednesday");
        assert_eq!(month_name(date), "January");

        let date = NaiveDate::from_ymd_opt(2012, 12, 30).unwrap();
        assert_eq!(day_name(date), "Sunday");
        assert_eq!(month_name(date), "December");
    }

    #[test]
    fn test_weekday_flag() {
        for name in WORKDAY_NAMES {
            assert_eq!(weekday_flag(Some(name)), 1);
        }
        assert_eq!(weekday_flag(Some("Saturday")), 0);
        assert_eq!(weekday_flag(Some("Sunday")), 0);
        assert_eq!(weekday_flag(None), 0);
    }
}
