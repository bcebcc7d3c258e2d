pub mod table_reader;

pub use table_reader::{DataSources, RawTable};
