//! Integration tests for dashboard generation

use std::fs;
use std::path::Path;

use bikeshare_common::test_utils::{create_temp_dir, init_test_logging, write_sample_datasets};
use bikeshare_config::Config;
use bikeshare_dashboard::{generate, INDEX_FILE, SUMMARY_FILE};
use chrono::NaiveDate;

fn config_for(dir: &Path) -> Config {
    let (day, hour) = write_sample_datasets(dir);
    let mut config = Config::default();
    config.data.day_csv = day.display().to_string();
    config.data.hour_csv = hour.display().to_string();
    config.dashboard.output_dir = dir.join("out").display().to_string();
    config
}

#[test]
fn test_generates_page_with_every_enabled_chart() {
    init_test_logging();
    let dir = create_temp_dir();
    let config = config_for(dir.path());

    let report = generate(&config).unwrap();
    let page = fs::read_to_string(&report.index_path).unwrap();

    assert_eq!(report.sections, 7);
    assert_eq!(report.charts, 19);
    assert_eq!(page.matches("<svg").count(), report.charts);
    assert!(page.contains("Total Users"));
    assert!(page.contains("20,936"));
    assert!(page.contains("Casual Users"));
    assert!(page.contains("4,654"));
    assert!(page.contains("Registered Users"));
    assert!(page.contains("16,282"));
    assert!(page.contains("2011-01-01 to 2012-12-31"));
    assert!(report.json_path.is_none());
    assert!(!dir.path().join("out").join(SUMMARY_FILE).exists());
}

#[test]
fn test_disabled_sections_drop_their_charts() {
    let dir = create_temp_dir();
    let mut config = config_for(dir.path());
    config.charts.sections.environment = false;
    config.charts.sections.special_days = false;

    let report = generate(&config).unwrap();
    let page = fs::read_to_string(&report.index_path).unwrap();

    assert_eq!(report.charts, 19 - 5 - 2);
    assert_eq!(page.matches("<svg").count(), report.charts);
    assert!(!page.contains(r#"id="environment""#));
}

#[test]
fn test_json_summary_export() {
    let dir = create_temp_dir();
    let mut config = config_for(dir.path());
    config.dashboard.write_json = true;
    config.dashboard.start_date = NaiveDate::from_ymd_opt(2012, 1, 1);

    let report = generate(&config).unwrap();
    let json_path = report.json_path.clone().unwrap();
    assert!(json_path.ends_with(SUMMARY_FILE));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(json["metrics"]["total"], 7403 + 2729);
    assert_eq!(json["range"]["start"], "2012-01-01");
    assert_eq!(json["range"]["end"], "2012-12-31");
    assert_eq!(json["by_hour"].as_array().unwrap().len(), 24);
}

#[test]
fn test_window_outside_data_renders_zeros() {
    let dir = create_temp_dir();
    let mut config = config_for(dir.path());
    config.dashboard.start_date = NaiveDate::from_ymd_opt(2014, 1, 1);
    config.dashboard.end_date = NaiveDate::from_ymd_opt(2014, 12, 31);

    let report = generate(&config).unwrap();
    assert_eq!(report.metrics.total, 0);
    assert_eq!(report.metrics.casual + report.metrics.registered, 0);

    let page = fs::read_to_string(dir.path().join("out").join(INDEX_FILE)).unwrap();
    assert_eq!(page.matches("<svg").count(), 19);
    assert!(page.contains("No data"));
}

#[test]
fn test_reversed_window_is_rejected() {
    let dir = create_temp_dir();
    let mut config = config_for(dir.path());
    config.dashboard.start_date = NaiveDate::from_ymd_opt(2012, 6, 1);
    config.dashboard.end_date = NaiveDate::from_ymd_opt(2012, 1, 1);

    let err = generate(&config).unwrap_err();
    assert!(format!("{err:#}").contains("after end date"));
}

#[test]
fn test_missing_dataset_is_fatal() {
    let dir = create_temp_dir();
    let mut config = config_for(dir.path());
    config.data.hour_csv = dir.path().join("absent.csv").display().to_string();

    let err = generate(&config).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
    assert!(!dir.path().join("out").join(INDEX_FILE).exists());
}
