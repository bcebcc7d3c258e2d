use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::calendar::{day_name, month_name, parse_date, weekday_flag};
use crate::utils::constants::{BASE_YEAR, FOLLOWING_YEAR, TEMP_SCALE_C};

/// One CSV row as it appears in the source, with fields renamed to canonical names.
///
/// `hour` is only present in the hourly source; the schema check in the
/// pipeline decides whether its absence is an error. The descriptive columns
/// after `registered` are optional: absent, empty or non-numeric cells read
/// as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRentalRow {
    pub dteday: String,
    #[serde(rename = "yr")]
    pub year_code: u8,
    #[serde(rename = "mnth")]
    pub month: u8,
    #[serde(rename = "hr", default)]
    pub hour: Option<u8>,
    #[serde(rename = "hum")]
    pub humidity: f64,
    #[serde(rename = "cnt")]
    pub total_rentals: u32,
    pub temp: f64,
    pub weathersit: u8,
    pub casual: u32,
    pub registered: u32,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub season: Option<u8>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub holiday: Option<u8>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub workingday: Option<u8>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub atemp: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub windspeed: Option<f64>,
}

/// Attributes shared by the daily and hourly tables after enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RentalObservation {
    pub date: Option<NaiveDate>,
    pub year_code: u8,

    #[validate(range(min = 1, max = 12))]
    pub month: u8,

    pub day_of_week_name: Option<String>,
    pub month_name: Option<String>,
    pub year_actual: i32,

    #[validate(range(min = 0.0, max = 1.0))]
    pub humidity: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub temp: f64,

    pub temp_c: f64,

    #[validate(range(min = 1, max = 4))]
    pub weathersit: u8,

    pub casual: u32,
    pub registered: u32,
    pub total_rentals: u32,

    #[validate(range(min = 1, max = 4))]
    pub season: Option<u8>,

    #[validate(range(max = 1))]
    pub holiday: Option<u8>,

    #[validate(range(max = 1))]
    pub workingday: Option<u8>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub atemp: Option<f64>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub windspeed: Option<f64>,
}

impl RentalObservation {
    /// Build the enriched observation from a raw row. Never fails: an
    /// unparseable date leaves the date-derived fields empty.
    pub fn from_raw(raw: &RawRentalRow) -> Self {
        let date = parse_date(&raw.dteday);

        Self {
            date,
            year_code: raw.year_code,
            month: raw.month,
            day_of_week_name: date.map(|d| day_name(d).to_string()),
            month_name: date.map(|d| month_name(d).to_string()),
            year_actual: Self::year_for_code(raw.year_code),
            humidity: raw.humidity,
            temp: raw.temp,
            temp_c: raw.temp * TEMP_SCALE_C,
            weathersit: raw.weathersit,
            casual: raw.casual,
            registered: raw.registered,
            total_rentals: raw.total_rentals,
            season: raw.season,
            holiday: raw.holiday,
            workingday: raw.workingday,
            atemp: raw.atemp,
            windspeed: raw.windspeed,
        }
    }

    pub fn year_for_code(year_code: u8) -> i32 {
        if year_code == 0 {
            BASE_YEAR
        } else {
            FOLLOWING_YEAR
        }
    }

    pub fn has_consistent_total(&self) -> bool {
        u64::from(self.casual) + u64::from(self.registered) == u64::from(self.total_rentals)
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    fn numeric_fields(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("year_code", Some(f64::from(self.year_code))),
            ("month", Some(f64::from(self.month))),
            ("season", self.season.map(f64::from)),
            ("holiday", self.holiday.map(f64::from)),
            ("workingday", self.workingday.map(f64::from)),
            ("weathersit", Some(f64::from(self.weathersit))),
            ("temp", Some(self.temp)),
            ("atemp", self.atemp),
            ("temp_c", Some(self.temp_c)),
            ("humidity", Some(self.humidity)),
            ("windspeed", self.windspeed),
            ("casual", Some(f64::from(self.casual))),
            ("registered", Some(f64::from(self.registered))),
            ("total_rentals", Some(f64::from(self.total_rentals))),
            ("year_actual", Some(f64::from(self.year_actual))),
        ]
    }
}

/// Numeric view of a record, in display column order; `None` marks a missing value
pub trait NumericColumns {
    fn numeric_fields(&self) -> Vec<(&'static str, Option<f64>)>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DailyRecord {
    #[serde(flatten)]
    #[validate(nested)]
    pub observation: RentalObservation,
}

impl DailyRecord {
    pub fn from_raw(raw: &RawRentalRow) -> Self {
        Self {
            observation: RentalObservation::from_raw(raw),
        }
    }
}

impl AsRef<RentalObservation> for DailyRecord {
    fn as_ref(&self) -> &RentalObservation {
        &self.observation
    }
}

impl NumericColumns for DailyRecord {
    fn numeric_fields(&self) -> Vec<(&'static str, Option<f64>)> {
        self.observation.numeric_fields()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct HourlyRecord {
    #[serde(flatten)]
    #[validate(nested)]
    pub observation: RentalObservation,

    #[validate(range(max = 23))]
    pub hour: u8,

    /// 1 on Monday..Friday, 0 otherwise
    pub weekday: u8,
}

impl HourlyRecord {
    pub fn new(observation: RentalObservation, hour: u8) -> Self {
        let weekday = weekday_flag(observation.day_of_week_name.as_deref());
        Self {
            observation,
            hour,
            weekday,
        }
    }

    pub fn is_weekday(&self) -> bool {
        self.weekday == 1
    }
}

impl AsRef<RentalObservation> for HourlyRecord {
    fn as_ref(&self) -> &RentalObservation {
        &self.observation
    }
}

impl NumericColumns for HourlyRecord {
    fn numeric_fields(&self) -> Vec<(&'static str, Option<f64>)> {
        let mut fields = self.observation.numeric_fields();
        fields.insert(2, ("hour", Some(f64::from(self.hour))));
        fields.push(("weekday", Some(f64::from(self.weekday))));
        fields
    }
}
