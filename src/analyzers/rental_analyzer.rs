use crate::analyzers::summary::histogram;
use crate::models::{HourlyRecord, RentalObservation, WeatherSituation};
use serde::Serialize;
use std::collections::BTreeMap;

/// Arithmetic mean; NaN for an empty input
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Pearson correlation coefficient; NaN below two pairs or with zero variance
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = mean(xs[..n].iter().copied());
    let mean_y = mean(ys[..n].iter().copied());

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        f64::NAN
    } else {
        sxy / (sxx * syy).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub year_actual: i32,
    pub month: u8,
    pub mean_total_rentals: f64,
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherGroup {
    pub weathersit: u8,
    pub description: String,
    pub mean_casual: f64,
    pub mean_registered: f64,
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherDrop {
    pub weathersit: u8,
    pub description: String,
    pub casual_pct_drop: f64,
    pub registered_pct_drop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherImpact {
    pub groups: Vec<WeatherGroup>,
}

impl WeatherImpact {
    pub fn group(&self, weathersit: u8) -> Option<&WeatherGroup> {
        self.groups.iter().find(|g| g.weathersit == weathersit)
    }

    /// Decrease of each group's means relative to the first (mildest) group present
    pub fn percentage_drop(&self) -> Vec<WeatherDrop> {
        let Some(baseline) = self.groups.first() else {
            return Vec::new();
        };

        self.groups
            .iter()
            .map(|g| WeatherDrop {
                weathersit: g.weathersit,
                description: g.description.clone(),
                casual_pct_drop: (1.0 - g.mean_casual / baseline.mean_casual) * 100.0,
                registered_pct_drop: (1.0 - g.mean_registered / baseline.mean_registered) * 100.0,
            })
            .collect()
    }

    pub fn summary(&self, with_drop: bool) -> String {
        let mut out = String::from("Average Rentals by Weather Situation\n");
        for g in &self.groups {
            out.push_str(&format!(
                "  {:<22} casual {:>8.1}  registered {:>8.1}  ({} obs)\n",
                g.description, g.mean_casual, g.mean_registered, g.observations
            ));
        }

        if with_drop {
            out.push_str("\nPercentage Decrease Compared to Clearest Weather\n");
            for d in self.percentage_drop() {
                out.push_str(&format!(
                    "  {:<22} casual {:>6.1}%  registered {:>6.1}%\n",
                    d.description, d.casual_pct_drop, d.registered_pct_drop
                ));
            }
        }

        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyAverage {
    pub hour: u8,
    pub mean_total_rentals: f64,
    pub observations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyTrends {
    pub weekday: Vec<HourlyAverage>,
    pub weekend: Vec<HourlyAverage>,
}

impl HourlyTrends {
    pub fn summary(&self) -> String {
        let weekend: BTreeMap<u8, f64> = self
            .weekend
            .iter()
            .map(|h| (h.hour, h.mean_total_rentals))
            .collect();
        let weekday: BTreeMap<u8, f64> = self
            .weekday
            .iter()
            .map(|h| (h.hour, h.mean_total_rentals))
            .collect();

        let mut hours: Vec<u8> = weekday.keys().chain(weekend.keys()).copied().collect();
        hours.sort_unstable();
        hours.dedup();

        let mut out = String::from("Average Hourly Rentals by Weekday/Weekend\n  Hour   Weekday   Weekend\n");
        for hour in hours {
            let fmt = |v: Option<&f64>| v.map_or("-".to_string(), |v| format!("{:.1}", v));
            out.push_str(&format!(
                "  {:>4} {:>9} {:>9}\n",
                hour,
                fmt(weekday.get(&hour)),
                fmt(weekend.get(&hour))
            ));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperaturePoint {
    pub temp_c: f64,
    pub total_rentals: u32,
}

/// Equal-width `temp_c` band; the last band includes its upper edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureBand {
    pub lower_c: f64,
    pub upper_c: f64,
    pub mean_total_rentals: f64,
    pub observations: usize,
}

/// Relationship between temperature and total rentals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureEffect {
    pub points: Vec<TemperaturePoint>,
    pub correlation: f64,
    pub bands: Vec<TemperatureBand>,
}

impl TemperatureEffect {
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Rentals vs. Temperature ({} observations, Pearson r = {:.3})\n",
            self.points.len(),
            self.correlation
        );
        for (i, band) in self.bands.iter().enumerate() {
            out.push_str(&format!(
                "  [{:>5.1}C, {:>5.1}C{} mean {:>8.1} ({} obs)\n",
                band.lower_c,
                band.upper_c,
                if i + 1 == self.bands.len() { "]" } else { ")" },
                band.mean_total_rentals,
                band.observations
            ));
        }
        out
    }
}

pub fn monthly_summary(rows: &[MonthlyAverage]) -> String {
    let mut out = String::from("Average Daily Rentals by Month and Year\n");
    for row in rows {
        out.push_str(&format!(
            "  {} month {:>2}: {:>8.1} ({} days)\n",
            row.year_actual, row.month, row.mean_total_rentals, row.observations
        ));
    }
    out
}

/// Group-by-mean reductions over enriched records
pub struct RentalAnalyzer;

impl RentalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Mean total rentals per (year, month), ordered by year then month
    pub fn monthly_comparison<R: AsRef<RentalObservation>>(&self, records: &[R]) -> Vec<MonthlyAverage> {
        let mut groups: BTreeMap<(i32, u8), Vec<f64>> = BTreeMap::new();
        for record in records {
            let obs = record.as_ref();
            groups
                .entry((obs.year_actual, obs.month))
                .or_default()
                .push(f64::from(obs.total_rentals));
        }

        groups
            .into_iter()
            .map(|((year_actual, month), values)| MonthlyAverage {
                year_actual,
                month,
                observations: values.len(),
                mean_total_rentals: mean(values),
            })
            .collect()
    }

    /// Mean casual and registered rentals per weather code
    pub fn weather_impact<R: AsRef<RentalObservation>>(&self, records: &[R]) -> WeatherImpact {
        let mut groups: BTreeMap<u8, Vec<&RentalObservation>> = BTreeMap::new();
        for record in records {
            let obs = record.as_ref();
            groups.entry(obs.weathersit).or_default().push(obs);
        }

        let groups = groups
            .into_iter()
            .map(|(weathersit, members)| WeatherGroup {
                weathersit,
                description: WeatherSituation::describe_code(weathersit),
                mean_casual: mean(members.iter().map(|o| f64::from(o.casual))),
                mean_registered: mean(members.iter().map(|o| f64::from(o.registered))),
                observations: members.len(),
            })
            .collect();

        WeatherImpact { groups }
    }

    /// `temp_c` against `total_rentals`: the raw pairs, their correlation and
    /// the mean rentals per temperature band
    pub fn temperature_effect<R: AsRef<RentalObservation>>(&self, records: &[R], bands: usize) -> TemperatureEffect {
        let points: Vec<TemperaturePoint> = records
            .iter()
            .map(|r| {
                let obs = r.as_ref();
                TemperaturePoint {
                    temp_c: obs.temp_c,
                    total_rentals: obs.total_rentals,
                }
            })
            .filter(|p| p.temp_c.is_finite())
            .collect();

        let temps: Vec<f64> = points.iter().map(|p| p.temp_c).collect();
        let totals: Vec<f64> = points.iter().map(|p| f64::from(p.total_rentals)).collect();
        let correlation = pearson(&temps, &totals);

        let layout = histogram(&temps, bands);
        let mut grouped: Vec<Vec<f64>> = vec![Vec::new(); layout.counts.len()];
        if let (Some(&lo), Some(&hi)) = (layout.edges.first(), layout.edges.last()) {
            let width = (hi - lo) / grouped.len() as f64;
            for (temp, total) in temps.iter().zip(&totals) {
                let index = (((temp - lo) / width) as usize).min(grouped.len() - 1);
                grouped[index].push(*total);
            }
        }

        let bands = grouped
            .into_iter()
            .enumerate()
            .map(|(i, values)| TemperatureBand {
                lower_c: layout.edges[i],
                upper_c: layout.edges[i + 1],
                observations: values.len(),
                mean_total_rentals: mean(values),
            })
            .collect();

        TemperatureEffect {
            points,
            correlation,
            bands,
        }
    }

    /// Mean total rentals per hour, split by the weekday flag
    pub fn hourly_trends(&self, records: &[HourlyRecord]) -> HourlyTrends {
        let by_hour = |weekday: bool| {
            let mut groups: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
            for record in records.iter().filter(|r| r.is_weekday() == weekday) {
                groups
                    .entry(record.hour)
                    .or_default()
                    .push(f64::from(record.observation.total_rentals));
            }

            groups
                .into_iter()
                .map(|(hour, values)| HourlyAverage {
                    hour,
                    observations: values.len(),
                    mean_total_rentals: mean(values),
                })
                .collect::<Vec<_>>()
        };

        HourlyTrends {
            weekday: by_hour(true),
            weekend: by_hour(false),
        }
    }
}

impl Default for RentalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
