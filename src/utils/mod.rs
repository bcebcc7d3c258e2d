pub mod calendar;
pub mod constants;
pub mod progress;

pub use calendar::{day_name, month_name, parse_date, weekday_flag};
pub use constants::*;
pub use progress::ProgressReporter;
