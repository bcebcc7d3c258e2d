use crate::error::Result;
use crate::models::{DailyRecord, HourlyRecord};
use crate::processors::pipeline::prepare;
use crate::readers::{DataSources, RawTable};
use serde::Serialize;
use tracing::info;

/// Row and date-quality counts gathered while preparing a dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrepareStats {
    pub daily_rows: usize,
    pub hourly_rows: usize,
    pub daily_unparsed_dates: usize,
    pub hourly_unparsed_dates: usize,
}

impl PrepareStats {
    pub fn summary(&self) -> String {
        format!(
            "Daily: {} rows ({} unparseable dates)\nHourly: {} rows ({} unparseable dates)",
            self.daily_rows, self.daily_unparsed_dates, self.hourly_rows, self.hourly_unparsed_dates
        )
    }
}

/// Both enriched tables, loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
    stats: PrepareStats,
}

impl Dataset {
    /// Read both source files and prepare them
    pub fn load(sources: &DataSources) -> Result<Self> {
        info!(
            "Loading daily data from {} and hourly data from {}",
            sources.daily.display(),
            sources.hourly.display()
        );

        let raw_daily = RawTable::from_path(&sources.daily)?;
        let raw_hourly = RawTable::from_path(&sources.hourly)?;

        Self::from_raw(&raw_daily, &raw_hourly)
    }

    pub fn from_raw(raw_daily: &RawTable, raw_hourly: &RawTable) -> Result<Self> {
        let (daily, hourly) = prepare(raw_daily, raw_hourly)?;

        let stats = PrepareStats {
            daily_rows: daily.len(),
            hourly_rows: hourly.len(),
            daily_unparsed_dates: daily.iter().filter(|r| !r.observation.has_date()).count(),
            hourly_unparsed_dates: hourly.iter().filter(|r| !r.observation.has_date()).count(),
        };

        Ok(Self {
            daily,
            hourly,
            stats,
        })
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    pub fn stats(&self) -> PrepareStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_from_raw_counts_unparsed_dates() {
        let daily = RawTable::from_reader(
            "day.csv",
            "dteday,yr,mnth,hum,cnt,temp,weathersit,casual,registered\n\
             2011-01-01,0,1,0.8,985,0.34,2,331,654\n\
             bogus,0,1,0.7,801,0.36,2,131,670\n"
                .as_bytes(),
        )
        .unwrap();
        let hourly = RawTable::from_reader(
            "hour.csv",
            "dteday,yr,mnth,hr,hum,cnt,temp,weathersit,casual,registered\n\
             2011-01-01,0,1,0,0.81,16,0.24,1,3,13\n"
                .as_bytes(),
        )
        .unwrap();

        let dataset = Dataset::from_raw(&daily, &hourly).unwrap();
        let stats = dataset.stats();

        assert_eq!(dataset.daily().len(), 2);
        assert_eq!(dataset.hourly().len(), 1);
        assert_eq!(stats.daily_unparsed_dates, 1);
        assert_eq!(stats.hourly_unparsed_dates, 0);
        assert!(stats.summary().contains("Daily: 2 rows (1 unparseable dates)"));
    }
}
