//! Test utilities and shared fixtures for the workspace.
//!
//! Fixtures are produced as CSV text in the dataset's column layout so every
//! crate can exercise the real loading path without depending on the data
//! crate.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Header of the daily dataset
pub const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

/// Header of the hourly dataset
pub const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

/// One fixture row; `hour` is only written for the hourly layout
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub date: &'static str,
    pub season: u8,
    pub yr: u8,
    pub mnth: u8,
    pub hour: Option<u8>,
    pub holiday: u8,
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u64,
    pub registered: u64,
}

impl SampleRow {
    /// Render the row as a CSV line, numbering it with `instant`
    pub fn to_csv_line(&self, instant: usize) -> String {
        let hour = self.hour.map(|h| format!("{h},")).unwrap_or_default();
        format!(
            "{instant},{},{},{},{},{hour}{},{},{},{},{},{},{},{},{},{},{}",
            self.date,
            self.season,
            self.yr,
            self.mnth,
            self.holiday,
            self.weekday,
            self.workingday,
            self.weathersit,
            self.temp,
            self.atemp,
            self.hum,
            self.windspeed,
            self.casual,
            self.registered,
            self.casual + self.registered,
        )
    }
}

fn day(
    date: &'static str,
    (season, yr, mnth): (u8, u8, u8),
    (holiday, weekday, workingday, weathersit): (u8, u8, u8, u8),
    (temp, atemp, hum, windspeed): (f64, f64, f64, f64),
    (casual, registered): (u64, u64),
) -> SampleRow {
    SampleRow {
        date,
        season,
        yr,
        mnth,
        hour: None,
        holiday,
        weekday,
        workingday,
        weathersit,
        temp,
        atemp,
        hum,
        windspeed,
        casual,
        registered,
    }
}

/// A small daily sample spanning both dataset years
pub fn sample_days() -> Vec<SampleRow> {
    vec![
        day("2011-01-01", (1, 0, 1), (0, 6, 0, 2), (0.344167, 0.363625, 0.805833, 0.160446), (331, 654)),
        day("2011-01-02", (1, 0, 1), (0, 0, 0, 2), (0.363478, 0.353739, 0.696087, 0.248539), (131, 670)),
        day("2011-01-03", (1, 0, 1), (0, 1, 1, 1), (0.196364, 0.189405, 0.437273, 0.248309), (120, 1229)),
        day("2011-01-04", (1, 0, 1), (0, 2, 1, 1), (0.2, 0.212122, 0.590435, 0.160296), (108, 1454)),
        day("2011-01-17", (1, 0, 1), (1, 1, 0, 2), (0.175833, 0.176771, 0.5375, 0.194017), (117, 883)),
        day("2011-06-15", (2, 0, 6), (0, 3, 1, 1), (0.626667, 0.587754, 0.471667, 0.167912), (846, 4261)),
        day("2012-07-04", (3, 1, 7), (1, 3, 0, 1), (0.789167, 0.732337, 0.53875, 0.13495), (2562, 4841)),
        day("2012-12-31", (1, 1, 12), (0, 1, 1, 2), (0.215833, 0.223487, 0.5775, 0.154846), (439, 2290)),
    ]
}

fn hour(
    date: &'static str,
    (season, yr, mnth): (u8, u8, u8),
    hour: u8,
    (holiday, weekday, workingday): (u8, u8, u8),
    (casual, registered): (u64, u64),
) -> SampleRow {
    SampleRow {
        date,
        season,
        yr,
        mnth,
        hour: Some(hour),
        holiday,
        weekday,
        workingday,
        weathersit: 1,
        temp: 0.24,
        atemp: 0.2879,
        hum: 0.81,
        windspeed: 0.0,
        casual,
        registered,
    }
}

/// A small hourly sample; dates overlap [`sample_days`]
pub fn sample_hours() -> Vec<SampleRow> {
    vec![
        hour("2011-01-01", (1, 0, 1), 0, (0, 6, 0), (3, 13)),
        hour("2011-01-01", (1, 0, 1), 1, (0, 6, 0), (8, 32)),
        hour("2011-01-01", (1, 0, 1), 2, (0, 6, 0), (5, 27)),
        hour("2011-01-03", (1, 0, 1), 8, (0, 1, 1), (2, 150)),
        hour("2011-01-03", (1, 0, 1), 17, (0, 1, 1), (10, 180)),
        hour("2012-07-04", (3, 1, 7), 8, (1, 3, 0), (90, 210)),
        hour("2012-07-04", (3, 1, 7), 17, (1, 3, 0), (250, 500)),
    ]
}

/// Render rows under a header as CSV text
pub fn to_csv(header: &str, rows: &[SampleRow]) -> String {
    let mut out = String::from(header);
    out.push('\n');
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&row.to_csv_line(i + 1));
        out.push('\n');
    }
    out
}

/// Write text to `dir/name` and return the path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create fixture file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write fixture file");
    path
}

/// Write the sample daily and hourly datasets into `dir`
pub fn write_sample_datasets(dir: &Path) -> (PathBuf, PathBuf) {
    let day_path = write_fixture(dir, "main_day.csv", &to_csv(DAY_HEADER, &sample_days()));
    let hour_path = write_fixture(dir, "main_hour.csv", &to_csv(HOUR_HEADER, &sample_hours()));
    (day_path, hour_path)
}
