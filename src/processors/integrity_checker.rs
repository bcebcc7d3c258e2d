use crate::models::{DailyRecord, HourlyRecord, RentalObservation};
use crate::utils::constants::{DAILY_TABLE, HOURLY_TABLE};
use serde::Serialize;
use tracing::warn;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub table: &'static str,
    pub total_records: usize,
    pub clean_records: usize,
    pub missing_date_records: usize,
    pub violations: Vec<RecordViolation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordViolation {
    /// Zero-based row index within the table
    pub row: usize,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    RentalSumMismatch,
    UnknownYearCode,
    OutOfRange,
    MissingDate,
}

impl IntegrityReport {
    fn new(table: &'static str, total_records: usize) -> Self {
        Self {
            table,
            total_records,
            clean_records: 0,
            missing_date_records: 0,
            violations: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count_of(&self, violation_type: ViolationType) -> usize {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .count()
    }
}

/// Non-fatal data-quality checks over enriched records
pub struct IntegrityChecker {
    max_listed_violations: usize,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            max_listed_violations: 10,
        }
    }

    pub fn with_max_listed_violations(max_listed_violations: usize) -> Self {
        Self {
            max_listed_violations,
        }
    }

    pub fn check_daily(&self, records: &[DailyRecord]) -> IntegrityReport {
        self.check_records(DAILY_TABLE, records)
    }

    pub fn check_hourly(&self, records: &[HourlyRecord]) -> IntegrityReport {
        self.check_records(HOURLY_TABLE, records)
    }

    fn check_records<R>(&self, table: &'static str, records: &[R]) -> IntegrityReport
    where
        R: AsRef<RentalObservation> + Validate,
    {
        let mut report = IntegrityReport::new(table, records.len());

        for (row, record) in records.iter().enumerate() {
            let before = report.violations.len();

            self.check_observation(row, record.as_ref(), &mut report);
            if let Err(errors) = record.validate() {
                push_range_violations(row, &errors, &mut report);
            }

            if report.violations.len() == before {
                report.clean_records += 1;
            }
        }

        log_report(&report);
        report
    }

    /// Checks that do not depend on the table kind
    fn check_observation(&self, row: usize, obs: &RentalObservation, report: &mut IntegrityReport) {
        if !obs.has_consistent_total() {
            report.violations.push(RecordViolation {
                row,
                violation_type: ViolationType::RentalSumMismatch,
                details: format!(
                    "total_rentals {} != casual {} + registered {}",
                    obs.total_rentals, obs.casual, obs.registered
                ),
            });
        }

        if obs.year_code > 1 {
            report.violations.push(RecordViolation {
                row,
                violation_type: ViolationType::UnknownYearCode,
                details: format!(
                    "year code {} is neither 0 nor 1 (mapped to {})",
                    obs.year_code, obs.year_actual
                ),
            });
        }

        if !obs.has_date() {
            report.missing_date_records += 1;
            report.violations.push(RecordViolation {
                row,
                violation_type: ViolationType::MissingDate,
                details: "date could not be parsed".to_string(),
            });
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();
        let pct = |n: usize| {
            if report.total_records == 0 {
                0.0
            } else {
                100.0 * n as f64 / report.total_records as f64
            }
        };

        summary.push_str(&format!("=== Integrity Check: {} table ===\n", report.table));
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Clean Records: {} ({:.1}%)\n",
            report.clean_records,
            pct(report.clean_records)
        ));
        summary.push_str(&format!(
            "Unparseable Dates: {}\n",
            report.missing_date_records
        ));
        summary.push_str(&format!(
            "Rental Sum Mismatches: {}\n",
            report.count_of(ViolationType::RentalSumMismatch)
        ));
        summary.push_str(&format!(
            "Out Of Range Values: {}\n",
            report.count_of(ViolationType::OutOfRange)
        ));
        summary.push_str(&format!(
            "Unknown Year Codes: {}\n",
            report.count_of(ViolationType::UnknownYearCode)
        ));

        if !report.violations.is_empty() {
            summary.push_str(&format!(
                "\nFirst {} Violations:\n",
                self.max_listed_violations.min(report.violations.len())
            ));
            for (i, violation) in report
                .violations
                .iter()
                .take(self.max_listed_violations)
                .enumerate()
            {
                summary.push_str(&format!(
                    "  {}. Row {}: {}\n",
                    i + 1,
                    violation.row,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn push_range_violations(row: usize, errors: &ValidationErrors, report: &mut IntegrityReport) {
    // Nested struct errors are reported as "outer.field"
    let mut details = Vec::new();
    collect_field_errors("", errors, &mut details);

    for detail in details {
        report.violations.push(RecordViolation {
            row,
            violation_type: ViolationType::OutOfRange,
            details: detail,
        });
    }
}

fn collect_field_errors(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let name = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let value = error
                        .params
                        .get("value")
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    out.push(format!("{} out of range (value {})", name, value));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(&name, nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_field_errors(&name, nested, out);
                }
            }
        }
    }
}

fn log_report(report: &IntegrityReport) {
    if !report.is_clean() {
        warn!(
            "{} table: {} integrity violations across {} records",
            report.table,
            report.violations.len(),
            report.total_records
        );
    }
}
