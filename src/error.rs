use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Failed to load data from {source_name}: {cause}")]
    DataLoad {
        source_name: String,
        #[source]
        cause: LoadFailure,
    },

    #[error("{table} table from {source_name} is missing required column(s): {}", missing.join(", "))]
    Schema {
        table: &'static str,
        source_name: String,
        missing: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Underlying reason a source could not be read as a table.
#[derive(Error, Debug)]
pub enum LoadFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("no header row")]
    Empty,
}

impl ProcessingError {
    pub fn data_load(source_name: impl Into<String>, cause: impl Into<LoadFailure>) -> Self {
        ProcessingError::DataLoad {
            source_name: source_name.into(),
            cause: cause.into(),
        }
    }

    pub fn is_data_load(&self) -> bool {
        matches!(self, ProcessingError::DataLoad { .. })
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, ProcessingError::Schema { .. })
    }
}

impl From<::config::ConfigError> for ProcessingError {
    fn from(err: ::config::ConfigError) -> Self {
        ProcessingError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_missing_columns() {
        let err = ProcessingError::Schema {
            table: "daily",
            source_name: "day.csv".to_string(),
            missing: vec!["cnt".to_string(), "hum".to_string()],
        };

        assert!(err.is_schema());
        assert_eq!(
            err.to_string(),
            "daily table from day.csv is missing required column(s): cnt, hum"
        );
    }

    #[test]
    fn test_data_load_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = ProcessingError::data_load("hour.csv", io);

        assert!(err.is_data_load());
        assert!(err.to_string().starts_with("Failed to load data from hour.csv"));
    }
}
