//! Configuration schema definitions using serde

use bikeshare_common::LoggingConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the dashboard.
///
/// Every section falls back to its defaults, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset locations.
    pub data: DataConfig,
    /// Dashboard output and date range.
    pub dashboard: DashboardConfig,
    /// Real-world maxima of the normalized environmental readings.
    pub scales: ScaleConfig,
    /// Chart rendering configuration.
    pub charts: ChartsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Dataset locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the daily rentals CSV.
    pub day_csv: String,
    /// Path of the hourly rentals CSV.
    pub hour_csv: String,
}

/// Dashboard page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title.
    pub title: String,
    /// Directory receiving `index.html` and `summary.json`.
    pub output_dir: String,
    /// Whether to export the aggregates as JSON next to the page.
    pub write_json: bool,
    /// First day of the reporting window; defaults to the first day in the data.
    pub start_date: Option<NaiveDate>,
    /// Last day of the reporting window; defaults to the last day in the data.
    pub end_date: Option<NaiveDate>,
}

/// Maxima the environmental readings were divided by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Temperature maximum in Celsius.
    pub temperature: f64,
    /// Feeling temperature maximum in Celsius.
    pub feeling_temperature: f64,
    /// Humidity maximum in percent.
    pub humidity: f64,
    /// Windspeed maximum in km/h.
    pub windspeed: f64,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Whether to draw grid lines.
    pub enable_grid: bool,
    /// Color configuration.
    pub colors: ColorsConfig,
    /// Which dashboard sections are rendered.
    pub sections: SectionsConfig,
}

/// Color configuration, hex `#RRGGBB` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Page and chart background.
    pub background: String,
    /// Single-series line color.
    pub primary: String,
    /// Casual user series color.
    pub casual: String,
    /// Registered user series color.
    pub registered: String,
    /// One color per dataset year.
    pub years: Vec<String>,
    /// Gradient used for categorical bars and pie slices.
    pub categories: Vec<String>,
}

/// Dashboard section toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    /// Daily, monthly-by-year and monthly timeline lines.
    pub monthly_performance: bool,
    /// Bars by month, season and weekday.
    pub time_performance: bool,
    /// Holiday and working-day pies.
    pub special_days: bool,
    /// Environmental factor bars.
    pub environment: bool,
    /// Hourly rental lines.
    pub hourly: bool,
    /// Casual versus registered lines.
    pub user_patterns: bool,
    /// Casual and registered holiday metrics.
    pub special_day_metrics: bool,
}

impl SectionsConfig {
    /// Number of enabled sections
    pub fn enabled_count(&self) -> usize {
        [
            self.monthly_performance,
            self.time_performance,
            self.special_days,
            self.environment,
            self.hourly,
            self.user_patterns,
            self.special_day_metrics,
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count()
    }
}
