pub mod observation;
pub mod weather;

pub use observation::{DailyRecord, HourlyRecord, NumericColumns, RawRentalRow, RentalObservation};
pub use weather::WeatherSituation;
