//! Turns raw daily and hourly tables into enriched records.
//!
//! Structural problems (a missing column, a value that cannot be coerced to
//! its column type) fail the whole table. An unparseable date only affects
//! its own row: the date and the names derived from it are left empty.

use crate::error::{LoadFailure, ProcessingError, Result};
use crate::models::{DailyRecord, HourlyRecord, RawRentalRow, RentalObservation};
use crate::readers::RawTable;
use crate::utils::constants::{DAILY_COLUMNS, DAILY_TABLE, HOURLY_COLUMNS, HOURLY_TABLE};
use tracing::{info, warn};

/// Prepare both tables. Fails on the first table that cannot be built; no
/// partial output is returned.
pub fn prepare(
    raw_daily: &RawTable,
    raw_hourly: &RawTable,
) -> Result<(Vec<DailyRecord>, Vec<HourlyRecord>)> {
    let daily = prepare_daily(raw_daily)?;
    let hourly = prepare_hourly(raw_hourly)?;
    Ok((daily, hourly))
}

pub fn prepare_daily(raw: &RawTable) -> Result<Vec<DailyRecord>> {
    let rows = typed_rows(raw, DAILY_TABLE, &DAILY_COLUMNS)?;
    let records: Vec<DailyRecord> = rows.iter().map(DailyRecord::from_raw).collect();

    let missing_dates = records.iter().filter(|r| !r.observation.has_date()).count();
    report_prepared(DAILY_TABLE, raw, records.len(), missing_dates);

    Ok(records)
}

pub fn prepare_hourly(raw: &RawTable) -> Result<Vec<HourlyRecord>> {
    let rows = typed_rows(raw, HOURLY_TABLE, &HOURLY_COLUMNS)?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| -> Result<HourlyRecord> {
            let hour = row.hour.ok_or_else(|| {
                ProcessingError::data_load(
                    raw.source_name(),
                    LoadFailure::Malformed {
                        row: index + 1,
                        message: "empty hr value".to_string(),
                    },
                )
            })?;
            Ok(HourlyRecord::new(RentalObservation::from_raw(row), hour))
        })
        .collect::<Result<Vec<_>>>()?;

    let missing_dates = records.iter().filter(|r| !r.observation.has_date()).count();
    report_prepared(HOURLY_TABLE, raw, records.len(), missing_dates);

    Ok(records)
}

/// Check the header against the required columns, then coerce every row
fn typed_rows(raw: &RawTable, table: &'static str, required: &[&str]) -> Result<Vec<RawRentalRow>> {
    let missing = raw.missing_columns(required);
    if !missing.is_empty() {
        return Err(ProcessingError::Schema {
            table,
            source_name: raw.source_name().to_string(),
            missing,
        });
    }

    raw.rows()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .deserialize::<RawRentalRow>(Some(raw.headers()))
                .map_err(|e| {
                    ProcessingError::data_load(
                        raw.source_name(),
                        LoadFailure::Malformed {
                            row: index + 1,
                            message: e.to_string(),
                        },
                    )
                })
        })
        .collect()
}

fn report_prepared(table: &str, raw: &RawTable, rows: usize, missing_dates: usize) {
    info!("Prepared {} {} records from {}", rows, table, raw.source_name());

    if missing_dates > 0 {
        warn!(
            "{} of {} {} rows have an unparseable date; their day and month names are empty",
            missing_dates, rows, table
        );
    }
}
