pub mod dataset;
pub mod integrity_checker;
pub mod pipeline;

pub use dataset::{Dataset, PrepareStats};
pub use integrity_checker::{IntegrityChecker, IntegrityReport, RecordViolation, ViolationType};
pub use pipeline::{prepare, prepare_daily, prepare_hourly};
