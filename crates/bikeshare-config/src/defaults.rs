//! Default values for every configuration section.

use crate::schema::*;

/// Default path of the daily dataset.
pub const DEFAULT_DAY_CSV: &str = "main_day.csv";
/// Default path of the hourly dataset.
pub const DEFAULT_HOUR_CSV: &str = "main_hour.csv";

/// Temperature values are divided by 41 (max) in the dataset.
pub const TEMPERATURE_MAX: f64 = 41.0;
/// Feeling temperature values are divided by 50 (max).
pub const FEELING_TEMPERATURE_MAX: f64 = 50.0;
/// Humidity values are divided by 100 (max).
pub const HUMIDITY_MAX: f64 = 100.0;
/// Windspeed values are divided by 67 (max).
pub const WINDSPEED_MAX: f64 = 67.0;

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            day_csv: DEFAULT_DAY_CSV.to_string(),
            hour_csv: DEFAULT_HOUR_CSV.to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Bike Sharing Data Analysis Dashboard".to_string(),
            output_dir: "dashboard".to_string(),
            write_json: false,
            start_date: None,
            end_date: None,
        }
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_MAX,
            feeling_temperature: FEELING_TEMPERATURE_MAX,
            humidity: HUMIDITY_MAX,
            windspeed: WINDSPEED_MAX,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 480,
            enable_grid: true,
            colors: ColorsConfig::default(),
            sections: SectionsConfig::default(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            primary: "#1f77b4".to_string(),
            casual: "#ff7f0e".to_string(),
            registered: "#1f77b4".to_string(),
            years: vec!["#08306b".to_string(), "#e6550d".to_string()],
            // GnBu-style ramp, light to dark
            categories: vec![
                "#ccebc5".to_string(),
                "#a8ddb5".to_string(),
                "#7bccc4".to_string(),
                "#4eb3d3".to_string(),
                "#2b8cbe".to_string(),
                "#0868ac".to_string(),
                "#084081".to_string(),
            ],
        }
    }
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            monthly_performance: true,
            time_performance: true,
            special_days: true,
            environment: true,
            hourly: true,
            user_patterns: true,
            special_day_metrics: true,
        }
    }
}
