use crate::analyzers::rental_analyzer::mean;
use crate::models::NumericColumns;
use crate::utils::constants::MAX_HISTOGRAM_BINS;
use serde::Serialize;

/// Descriptive statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_values(column: &'static str, mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.total_cmp(b));
        let count = values.len();
        let avg = mean(values.iter().copied());

        // Sample standard deviation, undefined below two values
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        Self {
            column,
            count,
            mean: avg,
            std,
            min: values.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q75: quantile(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Linearly interpolated quantile of already sorted values
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Per-column statistics in the record's column order. Missing values are
/// left out of the count; a column with no values at all is omitted.
pub fn describe<R: NumericColumns>(records: &[R]) -> Vec<ColumnSummary> {
    let mut columns: Vec<(&'static str, Vec<f64>)> = Vec::new();

    for record in records {
        for (name, value) in record.numeric_fields() {
            let index = match columns.iter().position(|(column, _)| *column == name) {
                Some(index) => index,
                None => {
                    columns.push((name, Vec::with_capacity(records.len())));
                    columns.len() - 1
                }
            };
            if let Some(value) = value {
                columns[index].1.push(value);
            }
        }
    }

    columns
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| ColumnSummary::from_values(name, values))
        .collect()
}

pub fn describe_summary(summaries: &[ColumnSummary]) -> String {
    let mut out = format!(
        "{:<14} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in summaries {
        out.push_str(&format!(
            "{:<14} {:>7} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}\n",
            s.column, s.count, s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max
        ));
    }
    out
}

/// Equal-width histogram; the last bin includes its upper edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn summary(&self, title: &str) -> String {
        let mut out = format!("{} ({} values)\n", title, self.total());
        for (i, count) in self.counts.iter().enumerate() {
            out.push_str(&format!(
                "  [{:>9.1}, {:>9.1}{} {}\n",
                self.edges[i],
                self.edges[i + 1],
                if i + 1 == self.counts.len() { "]" } else { ")" },
                count
            ));
        }
        out
    }
}

/// Equal-width bins over the finite values; `bins` is capped at
/// `MAX_HISTOGRAM_BINS`
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.min(MAX_HISTOGRAM_BINS);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if bins == 0 || finite.is_empty() {
        return Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
        };
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];

    for v in finite {
        let index = (((v - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    Histogram { edges, counts }
}

/// First `n` records
pub fn head<R>(records: &[R], n: usize) -> &[R] {
    &records[..n.min(records.len())]
}
