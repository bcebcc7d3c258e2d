use crate::error::Result;
use crate::readers::DataSources;
use crate::utils::constants::{
    DAILY_FILE, DEFAULT_DAILY_BINS, DEFAULT_HEAD_ROWS, DEFAULT_HOURLY_BINS,
    DEFAULT_TEMPERATURE_BANDS, HOURLY_FILE,
};
use ::config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataSettings {
    pub dir: PathBuf,
    pub daily_file: PathBuf,
    pub hourly_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportSettings {
    pub head_rows: usize,
    pub daily_bins: usize,
    pub hourly_bins: usize,
    pub temperature_bands: usize,
}

/// Settings from built-in defaults, optionally overlaid by a TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    pub report: ReportSettings,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("data.dir", ".")?
            .set_default("data.daily_file", DAILY_FILE)?
            .set_default("data.hourly_file", HOURLY_FILE)?
            .set_default("report.head_rows", DEFAULT_HEAD_ROWS as u64)?
            .set_default("report.daily_bins", DEFAULT_DAILY_BINS as u64)?
            .set_default("report.hourly_bins", DEFAULT_HOURLY_BINS as u64)?
            .set_default("report.temperature_bands", DEFAULT_TEMPERATURE_BANDS as u64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Resolve the source files; relative file names are joined onto `data.dir`
    pub fn sources(&self) -> DataSources {
        DataSources::new(
            self.data.dir.join(&self.data.daily_file),
            self.data.dir.join(&self.data.hourly_file),
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings {
                dir: PathBuf::from("."),
                daily_file: PathBuf::from(DAILY_FILE),
                hourly_file: PathBuf::from(HOURLY_FILE),
            },
            report: ReportSettings {
                head_rows: DEFAULT_HEAD_ROWS,
                daily_bins: DEFAULT_DAILY_BINS,
                hourly_bins: DEFAULT_HOURLY_BINS,
                temperature_bands: DEFAULT_TEMPERATURE_BANDS,
            },
        }
    }
}
