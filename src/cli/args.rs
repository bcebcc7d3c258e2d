use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare-analytics")]
#[command(about = "Descriptive analysis of daily and hourly bike-share rentals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding day.csv and hour.csv")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Daily rentals CSV (overrides --data-dir)")]
    pub daily_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Hourly rentals CSV (overrides --data-dir)")]
    pub hourly_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Print results as JSON")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableChoice {
    Daily,
    Hourly,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sample rows, descriptive statistics and rental distribution
    Overview {
        #[arg(short, long, value_enum, default_value = "daily")]
        table: TableChoice,

        #[arg(long, help = "Number of sample rows [default: from config]")]
        head: Option<usize>,

        #[arg(
            long,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=10_000),
            help = "Histogram bins [default: 20 daily, 50 hourly]"
        )]
        bins: Option<usize>,

        #[arg(
            long,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=10_000),
            help = "Temperature bands for the daily rentals vs. temperature view [default: from config]"
        )]
        bands: Option<usize>,
    },

    /// Average daily rentals per month, 2011 against 2012
    Yearly,

    /// Average casual and registered rentals per weather situation
    Weather {
        #[arg(long, help = "Also show the percentage decrease from the clearest weather")]
        pct_drop: bool,
    },

    /// Average hourly rentals on weekdays and weekends
    Hourly,

    /// Check both tables for data-quality problems
    Validate {
        #[arg(long, default_value_t = 10, help = "Violations listed per table")]
        max_listed: usize,
    },
}
