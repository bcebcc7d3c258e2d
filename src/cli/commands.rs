use crate::analyzers::{describe, describe_summary, head, histogram, monthly_summary, RentalAnalyzer};
use crate::cli::args::{Cli, Commands, TableChoice};
use crate::config::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::{HourlyRecord, RentalObservation};
use crate::processors::{Dataset, IntegrityChecker};
use crate::readers::DataSources;
use crate::utils::constants::{DAILY_FILE, HOURLY_FILE};
use crate::utils::progress::ProgressReporter;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let sources = resolve_sources(&cli, &settings);

    let progress = ProgressReporter::new_spinner("Loading rental data...", cli.quiet || cli.json);
    let dataset = match Dataset::load(&sources) {
        Ok(dataset) => dataset,
        Err(e) => {
            progress.abandon_with_message("Failed to load rental data");
            error!("Error loading data: {}", e);
            eprintln!("{}", load_diagnostic(&e, &sources));
            return Err(e);
        }
    };
    progress.finish_with_message(&format!(
        "Loaded {} daily and {} hourly records",
        dataset.daily().len(),
        dataset.hourly().len()
    ));
    info!("{}", dataset.stats().summary().replace('\n', "; "));

    let analyzer = RentalAnalyzer::new();

    match cli.command {
        Commands::Overview {
            table,
            head: rows,
            bins,
            bands,
        } => {
            let rows = rows.unwrap_or(settings.report.head_rows);

            match table {
                TableChoice::Daily => {
                    let bins = bins.unwrap_or(settings.report.daily_bins);
                    let records = dataset.daily();
                    let stats = describe(records);
                    let totals: Vec<f64> = records
                        .iter()
                        .map(|r| f64::from(r.observation.total_rentals))
                        .collect();
                    let hist = histogram(&totals, bins);
                    let temperature = analyzer.temperature_effect(
                        records,
                        bands.unwrap_or(settings.report.temperature_bands),
                    );
                    let sample = head(records, rows);

                    if cli.json {
                        emit_json(&json!({
                            "table": "daily",
                            "head": sample,
                            "describe": stats,
                            "histogram": hist,
                            "temperature_effect": temperature,
                        }))?;
                    } else {
                        println!("Daily Data Sample");
                        for record in sample {
                            println!("  {}", format_observation(&record.observation));
                        }
                        println!("\nDaily Data Statistics\n{}", describe_summary(&stats));
                        println!("{}", hist.summary("Distribution of Daily Total Rentals"));
                        println!("{}", temperature.summary());
                    }
                }
                TableChoice::Hourly => {
                    let bins = bins.unwrap_or(settings.report.hourly_bins);
                    let records = dataset.hourly();
                    let stats = describe(records);
                    let totals: Vec<f64> = records
                        .iter()
                        .map(|r| f64::from(r.observation.total_rentals))
                        .collect();
                    let hist = histogram(&totals, bins);
                    let trends = analyzer.hourly_trends(records);
                    let sample = head(records, rows);

                    if cli.json {
                        emit_json(&json!({
                            "table": "hourly",
                            "head": sample,
                            "describe": stats,
                            "histogram": hist,
                            "hourly_trends": trends,
                        }))?;
                    } else {
                        println!("Hourly Data Sample");
                        for record in sample {
                            println!("  {}", format_hourly(record));
                        }
                        println!("\nHourly Data Statistics\n{}", describe_summary(&stats));
                        println!("{}", hist.summary("Distribution of Hourly Total Rentals"));
                        println!("{}", trends.summary());
                    }
                }
            }
        }

        Commands::Yearly => {
            let monthly = analyzer.monthly_comparison(dataset.daily());
            if cli.json {
                emit_json(&monthly)?;
            } else {
                println!("{}", monthly_summary(&monthly));
            }
        }

        Commands::Weather { pct_drop } => {
            let impact = analyzer.weather_impact(dataset.daily());
            if cli.json {
                if pct_drop {
                    emit_json(&json!({
                        "groups": impact.groups,
                        "percentage_drop": impact.percentage_drop(),
                    }))?;
                } else {
                    emit_json(&impact)?;
                }
            } else {
                println!("{}", impact.summary(pct_drop));
            }
        }

        Commands::Hourly => {
            let trends = analyzer.hourly_trends(dataset.hourly());
            if cli.json {
                emit_json(&trends)?;
            } else {
                println!("{}", trends.summary());
            }
        }

        Commands::Validate { max_listed } => {
            let checker = IntegrityChecker::with_max_listed_violations(max_listed);
            let daily_report = checker.check_daily(dataset.daily());
            let hourly_report = checker.check_hourly(dataset.hourly());

            if cli.json {
                emit_json(&json!({
                    "daily": daily_report,
                    "hourly": hourly_report,
                }))?;
            } else {
                println!("{}", checker.generate_summary(&daily_report));
                println!("{}", checker.generate_summary(&hourly_report));

                if daily_report.is_clean() && hourly_report.is_clean() {
                    println!("All records passed validation checks");
                } else {
                    println!(
                        "Found {} validation issues",
                        daily_report.violations.len() + hourly_report.violations.len()
                    );
                }
            }
        }
    }

    Ok(())
}

/// Explicit file flags win over `--data-dir`, which wins over the config file
pub fn resolve_sources(cli: &Cli, settings: &Settings) -> DataSources {
    let defaults = match &cli.data_dir {
        Some(dir) => DataSources::new(dir.join(&settings.data.daily_file), dir.join(&settings.data.hourly_file)),
        None => settings.sources(),
    };

    DataSources::new(
        cli.daily_file.clone().unwrap_or(defaults.daily),
        cli.hourly_file.clone().unwrap_or(defaults.hourly),
    )
}

/// Static message shown when the dataset cannot be built
pub fn load_diagnostic(err: &ProcessingError, sources: &DataSources) -> String {
    if err.is_schema() {
        format!(
            "The data files do not have the expected columns. Check that {} and {} are the bike-sharing day and hour tables.",
            sources.daily.display(),
            sources.hourly.display()
        )
    } else {
        format!(
            "Make sure to place '{}' and '{}' at {} and {}.",
            DAILY_FILE,
            HOURLY_FILE,
            sources.daily.display(),
            sources.hourly.display()
        )
    }
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_observation(obs: &RentalObservation) -> String {
    let date = obs
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "(no date)".to_string());

    format!(
        "{} {:<9} {:<9} {} season {} holiday {} workingday {} temp {:>5.1}C atemp {} hum {:.2} wind {} weather {} casual {:>4} registered {:>4} total {:>4}",
        date,
        obs.day_of_week_name.as_deref().unwrap_or("-"),
        obs.month_name.as_deref().unwrap_or("-"),
        obs.year_actual,
        optional(obs.season),
        optional(obs.holiday),
        optional(obs.workingday),
        obs.temp_c,
        optional(obs.atemp.map(|v| format!("{:.3}", v))),
        obs.humidity,
        optional(obs.windspeed.map(|v| format!("{:.3}", v))),
        obs.weathersit,
        obs.casual,
        obs.registered,
        obs.total_rentals
    )
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn format_hourly(record: &HourlyRecord) -> String {
    format!(
        "{} hour {:>2} weekday {}",
        format_observation(&record.observation),
        record.hour,
        record.weekday
    )
}
