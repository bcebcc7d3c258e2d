use bikeshare_analytics::analyzers::RentalAnalyzer;
use bikeshare_analytics::models::{DailyRecord, HourlyRecord};
use bikeshare_analytics::processors::{IntegrityChecker, ViolationType};
use bikeshare_analytics::utils::constants::WORKDAY_NAMES;
use bikeshare_analytics::{DataSources, Dataset, ProcessingError, RawTable};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DAY_CSV: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801
3,2011-01-03,1,0,1,0,1,1,1,0.196364,0.189405,0.437273,0.248309,120,1229,1349
4,2011-01-04,1,0,1,0,2,1,1,0.2,0.212122,0.590435,0.160296,108,1454,1562
5,2011-01-05,1,0,1,0,3,1,1,0.3,0.22927,0.5,0.1869,100,400,500
6,2012-01-01,1,1,1,0,0,0,1,0.37,0.375621,0.6925,0.192167,686,1608,2294
7,2012-01-02,1,1,1,1,1,0,1,0.273043,0.252304,0.381304,0.329665,244,1707,1951
8,2012-01-03,1,1,1,0,2,1,3,0.15,0.126275,0.44125,0.365671,89,2147,2236
";

const HOUR_CSV: &str = "\
instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,0,6,0,1,0.24,0.2879,0.81,0,3,13,16
2,2011-01-01,1,0,1,1,0,6,0,1,0.22,0.2727,0.8,0,8,32,40
3,2011-01-03,1,0,1,0,0,1,1,1,0.22,0.197,0.44,0.3582,0,5,5
4,2011-01-03,1,0,1,1,0,1,1,1,0.2,0.1667,0.44,0.4179,0,2,2
5,2011-01-04,1,0,1,0,0,2,1,1,0.16,0.1818,0.55,0.1045,0,5,5
6,2012-01-01,1,1,1,0,0,0,0,1,0.36,0.3485,0.66,0.1343,5,43,48
";

fn write_sources(dir: &Path, day: &str, hour: &str) -> DataSources {
    let sources = DataSources::in_dir(dir);
    fs::write(&sources.daily, day).expect("Failed to write day.csv");
    fs::write(&sources.hourly, hour).expect("Failed to write hour.csv");
    sources
}

#[test]
fn test_load_dataset_from_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);

    let dataset = Dataset::load(&sources).unwrap();

    assert_eq!(dataset.daily().len(), 8);
    assert_eq!(dataset.hourly().len(), 6);
    assert_eq!(dataset.stats().daily_unparsed_dates, 0);
}

#[test]
fn test_end_to_end_daily_row() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);
    let dataset = Dataset::load(&sources).unwrap();

    let obs = &dataset.daily()[4].observation;
    assert_eq!(obs.date, NaiveDate::from_ymd_opt(2011, 1, 5));
    assert_eq!(obs.year_actual, 2011);
    assert_eq!(obs.month_name.as_deref(), Some("January"));
    assert_eq!(obs.day_of_week_name.as_deref(), Some("Wednesday"));
    assert_eq!(obs.temp_c, 0.3 * 41.0);
    assert!((obs.temp_c - 12.3).abs() < 1e-9);
    assert_eq!(obs.casual, 100);
    assert_eq!(obs.registered, 400);
    assert_eq!(obs.total_rentals, 500);
}

#[test]
fn test_record_invariants_hold() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);
    let dataset = Dataset::load(&sources).unwrap();

    let check = |obs: &bikeshare_analytics::models::RentalObservation| {
        assert!(obs.has_consistent_total());
        assert!(obs.year_actual == 2011 || obs.year_actual == 2012);
        assert_eq!(obs.year_actual == 2011, obs.year_code == 0);
        assert_eq!(obs.temp_c, obs.temp * 41.0);
    };

    dataset.daily().iter().for_each(|r: &DailyRecord| check(&r.observation));
    dataset.hourly().iter().for_each(|r: &HourlyRecord| check(&r.observation));

    for record in dataset.hourly() {
        let is_workday = record
            .observation
            .day_of_week_name
            .as_deref()
            .map_or(false, |name| WORKDAY_NAMES.contains(&name));
        assert_eq!(record.weekday == 1, is_workday);
    }
}

#[test]
fn test_loading_twice_is_identical() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);

    let first = Dataset::load(&sources).unwrap();
    let second = Dataset::load(&sources).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_missing_file_is_data_load_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = DataSources::in_dir(temp_dir.path());
    fs::write(&sources.daily, DAY_CSV).unwrap();

    let err = Dataset::load(&sources).unwrap_err();
    match err {
        ProcessingError::DataLoad { source_name, .. } => {
            assert!(source_name.ends_with("hour.csv"));
        }
        other => panic!("expected DataLoad, got {other:?}"),
    }
}

#[test]
fn test_missing_cnt_column_is_schema_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let day_without_cnt = "dteday,yr,mnth,hum,temp,weathersit,casual,registered\n\
                           2011-01-01,0,1,0.8,0.34,2,331,654\n";
    let sources = write_sources(temp_dir.path(), day_without_cnt, HOUR_CSV);

    let err = Dataset::load(&sources).unwrap_err();
    match err {
        ProcessingError::Schema { table, missing, .. } => {
            assert_eq!(table, "daily");
            assert_eq!(missing, vec!["cnt".to_string()]);
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

#[test]
fn test_unparseable_dates_are_tolerated() {
    let day = DAY_CSV.replace("2011-01-02", "02.01.2011?");
    let daily = RawTable::from_reader("day.csv", day.as_bytes()).unwrap();
    let hourly = RawTable::from_reader("hour.csv", HOUR_CSV.as_bytes()).unwrap();

    let dataset = Dataset::from_raw(&daily, &hourly).unwrap();

    assert_eq!(dataset.daily().len(), daily.len());
    assert_eq!(dataset.stats().daily_unparsed_dates, 1);
    assert_eq!(dataset.daily()[1].observation.day_of_week_name, None);

    let report = IntegrityChecker::new().check_daily(dataset.daily());
    assert_eq!(report.count_of(ViolationType::MissingDate), 1);
}

#[test]
fn test_weather_impact_aggregation() {
    let day = "dteday,yr,mnth,hum,cnt,temp,weathersit,casual,registered\n\
               2011-01-01,0,1,0.5,110,0.3,1,10,100\n\
               2011-01-02,0,1,0.5,220,0.3,1,20,200\n\
               2011-01-03,0,1,0.5,330,0.3,1,30,300\n";
    let daily = RawTable::from_reader("day.csv", day.as_bytes()).unwrap();
    let hourly = RawTable::from_reader("hour.csv", HOUR_CSV.as_bytes()).unwrap();
    let dataset = Dataset::from_raw(&daily, &hourly).unwrap();

    let impact = RentalAnalyzer::new().weather_impact(dataset.daily());
    let clear = impact.group(1).unwrap();

    assert_eq!(clear.mean_casual, 20.0);
    assert_eq!(clear.mean_registered, 200.0);
}

#[test]
fn test_yearly_comparison_over_fixture() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);
    let dataset = Dataset::load(&sources).unwrap();

    let monthly = RentalAnalyzer::new().monthly_comparison(dataset.daily());

    assert_eq!(monthly.len(), 2);
    assert_eq!((monthly[0].year_actual, monthly[0].month), (2011, 1));
    assert_eq!(monthly[0].observations, 5);
    assert_eq!(monthly[0].mean_total_rentals, (985.0 + 801.0 + 1349.0 + 1562.0 + 500.0) / 5.0);
    assert_eq!(monthly[1].year_actual, 2012);
    assert!(monthly[1].mean_total_rentals > monthly[0].mean_total_rentals);
}

#[test]
fn test_fixture_passes_integrity_checks() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);
    let dataset = Dataset::load(&sources).unwrap();

    let checker = IntegrityChecker::new();
    assert!(checker.check_daily(dataset.daily()).is_clean());
    assert!(checker.check_hourly(dataset.hourly()).is_clean());
}

#[test]
fn test_temperature_effect_over_fixture() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);
    let dataset = Dataset::load(&sources).unwrap();

    let effect = RentalAnalyzer::new().temperature_effect(dataset.daily(), 4);

    assert_eq!(effect.points.len(), 8);
    assert_eq!(effect.bands.len(), 4);
    assert_eq!(effect.bands.iter().map(|b| b.observations).sum::<usize>(), 8);
    assert_eq!(effect.bands[0].lower_c, 0.15 * 41.0);
    assert!(effect.correlation.abs() <= 1.0);
}

#[test]
fn test_descriptive_columns_reach_describe() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let sources = write_sources(temp_dir.path(), DAY_CSV, HOUR_CSV);
    let dataset = Dataset::load(&sources).unwrap();

    let summaries = bikeshare_analytics::analyzers::describe(dataset.daily());
    let columns: Vec<&str> = summaries.iter().map(|s| s.column).collect();

    for column in ["season", "holiday", "workingday", "atemp", "windspeed"] {
        assert!(columns.contains(&column), "missing {column}");
    }
    let holiday = summaries.iter().find(|s| s.column == "holiday").unwrap();
    assert_eq!(holiday.count, 8);
    assert_eq!(holiday.max, 1.0);
}
