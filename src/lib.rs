pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;

pub use error::{ProcessingError, Result};
pub use processors::{prepare, Dataset};
pub use readers::{DataSources, RawTable};
