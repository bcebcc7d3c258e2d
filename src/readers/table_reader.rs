use crate::error::{LoadFailure, ProcessingError, Result};
use crate::utils::constants::{DAILY_FILE, HOURLY_FILE};
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A delimited table held as untyped header and records.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    source_name: String,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl RawTable {
    pub fn new(source_name: impl Into<String>, headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self {
            source_name: source_name.into(),
            headers,
            rows,
        }
    }

    /// Read a CSV file from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let bytes = fs::read(path).map_err(|e| ProcessingError::data_load(&source_name, e))?;
        debug!("Read {} bytes from {}", bytes.len(), source_name);

        Self::from_bytes(source_name, &bytes)
    }

    /// Read a CSV table from any reader
    pub fn from_reader<R: Read>(source_name: impl Into<String>, mut reader: R) -> Result<Self> {
        let source_name = source_name.into();
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| ProcessingError::data_load(&source_name, e))?;

        Self::from_bytes(source_name, &bytes)
    }

    fn from_bytes(source_name: String, bytes: &[u8]) -> Result<Self> {
        let text = decode_text(&source_name, bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ProcessingError::data_load(&source_name, e))?
            .clone();

        if headers.is_empty() {
            return Err(ProcessingError::data_load(&source_name, LoadFailure::Empty));
        }

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ProcessingError::data_load(&source_name, e))?;

        debug!(
            "Parsed {} rows with {} columns from {}",
            rows.len(),
            headers.len(),
            source_name
        );

        Ok(Self::new(source_name, headers, rows))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Required columns absent from the header, in the order given
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| !self.has_column(col))
            .map(|col| col.to_string())
            .collect()
    }
}

/// Decode file bytes, honouring a byte-order mark and defaulting to UTF-8
fn decode_text(source_name: &str, bytes: &[u8]) -> String {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .unwrap_or(UTF_8);

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(
            "{} contains bytes that are not valid {}; they were replaced",
            source_name,
            actual.name()
        );
    }

    text.into_owned()
}

/// Locations of the daily and hourly source files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub daily: PathBuf,
    pub hourly: PathBuf,
}

impl DataSources {
    pub fn new(daily: impl Into<PathBuf>, hourly: impl Into<PathBuf>) -> Self {
        Self {
            daily: daily.into(),
            hourly: hourly.into(),
        }
    }

    /// Default file names inside a directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DAILY_FILE), dir.join(HOURLY_FILE))
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::new(DAILY_FILE, HOURLY_FILE)
    }
}
