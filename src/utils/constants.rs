/// Default file names, relative to the data directory
pub const DAILY_FILE: &str = "day.csv";
pub const HOURLY_FILE: &str = "hour.csv";

/// Table labels used in errors and reports
pub const DAILY_TABLE: &str = "daily";
pub const HOURLY_TABLE: &str = "hourly";

/// Source column names
pub const COL_DATE: &str = "dteday";
pub const COL_YEAR: &str = "yr";
pub const COL_MONTH: &str = "mnth";
pub const COL_HOUR: &str = "hr";
pub const COL_HUMIDITY: &str = "hum";
pub const COL_TOTAL: &str = "cnt";
pub const COL_TEMP: &str = "temp";
pub const COL_WEATHER: &str = "weathersit";
pub const COL_CASUAL: &str = "casual";
pub const COL_REGISTERED: &str = "registered";

pub const DAILY_COLUMNS: [&str; 9] = [
    COL_DATE,
    COL_YEAR,
    COL_MONTH,
    COL_HUMIDITY,
    COL_TOTAL,
    COL_TEMP,
    COL_WEATHER,
    COL_CASUAL,
    COL_REGISTERED,
];

pub const HOURLY_COLUMNS: [&str; 10] = [
    COL_DATE,
    COL_YEAR,
    COL_MONTH,
    COL_HOUR,
    COL_HUMIDITY,
    COL_TOTAL,
    COL_TEMP,
    COL_WEATHER,
    COL_CASUAL,
    COL_REGISTERED,
];

/// Date layouts tried in order; the first that parses wins
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
/// Timestamp layouts; only the date part is kept
pub const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Year code mapping
pub const BASE_YEAR: i32 = 2011;
pub const FOLLOWING_YEAR: i32 = 2012;

/// Normalized temperature scale (t_max of the source dataset)
pub const TEMP_SCALE_C: f64 = 41.0;

pub const WORKDAY_NAMES: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Report defaults
pub const DEFAULT_HEAD_ROWS: usize = 5;
pub const DEFAULT_DAILY_BINS: usize = 20;
pub const DEFAULT_HOURLY_BINS: usize = 50;
pub const DEFAULT_TEMPERATURE_BANDS: usize = 8;
pub const MAX_HISTOGRAM_BINS: usize = 10_000;
