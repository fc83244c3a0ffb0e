//! Configuration validation

use crate::loader::ConfigError;
use crate::Config;
use regex::Regex;
use std::sync::LazyLock;
use tracing_subscriber::EnvFilter;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #1f77b4)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration, returning the first offending field
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        validate_path("data.day_csv", &config.data.day_csv)?;
        validate_path("data.hour_csv", &config.data.hour_csv)?;
        validate_path("dashboard.output_dir", &config.dashboard.output_dir)?;

        if let (Some(start), Some(end)) = (config.dashboard.start_date, config.dashboard.end_date) {
            if start > end {
                return Err(ConfigError::validation(
                    "dashboard.start_date",
                    format!("start date {start} is after end date {end}"),
                ));
            }
        }

        let scales = &config.scales;
        validate_scale("scales.temperature", scales.temperature)?;
        validate_scale("scales.feeling_temperature", scales.feeling_temperature)?;
        validate_scale("scales.humidity", scales.humidity)?;
        validate_scale("scales.windspeed", scales.windspeed)?;

        let charts = &config.charts;
        validate_dimension("charts.width", charts.width)?;
        validate_dimension("charts.height", charts.height)?;

        let colors = &charts.colors;
        validate_color("charts.colors.background", &colors.background)?;
        validate_color("charts.colors.primary", &colors.primary)?;
        validate_color("charts.colors.casual", &colors.casual)?;
        validate_color("charts.colors.registered", &colors.registered)?;
        validate_palette("charts.colors.years", &colors.years)?;
        validate_palette("charts.colors.categories", &colors.categories)?;

        validate_log_level(&config.logging.level)?;

        Ok(())
    }

    /// Check a single hex color
    pub fn is_valid_color(color: &str) -> bool {
        HEX_COLOR_REGEX.is_match(color)
    }
}

fn validate_path(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation(field, "path cannot be empty"));
    }
    Ok(())
}

fn validate_scale(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::validation(
            field,
            format!("scale must be a positive number, got {value}"),
        ));
    }
    Ok(())
}

fn validate_dimension(field: &str, value: u32) -> Result<(), ConfigError> {
    if !(100..=10_000).contains(&value) {
        return Err(ConfigError::validation(
            field,
            format!("must be between 100 and 10000 pixels, got {value}"),
        ));
    }
    Ok(())
}

fn validate_color(field: &str, value: &str) -> Result<(), ConfigError> {
    if !HEX_COLOR_REGEX.is_match(value) {
        return Err(ConfigError::validation(
            field,
            format!("'{value}' is not a #RRGGBB color"),
        ));
    }
    Ok(())
}

/// Accepts any directive string the logging filter accepts
fn validate_log_level(value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::validation("logging.level", "level cannot be empty"));
    }
    EnvFilter::try_new(value).map_err(|e| {
        ConfigError::validation("logging.level", format!("invalid filter '{value}': {e}"))
    })?;
    Ok(())
}

fn validate_palette(field: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::validation(field, "palette cannot be empty"));
    }
    values.iter().try_for_each(|color| validate_color(field, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#abc123"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_paths() {
        let mut config = Config::default();
        config.data.hour_csv = "  ".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("data.hour_csv"));
    }

    #[test]
    fn test_rejects_non_positive_scales() {
        for bad in [0.0, -41.0, f64::NAN, f64::INFINITY] {
            let mut config = Config::default();
            config.scales.windspeed = bad;
            assert!(ConfigValidator::validate(&config).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_rejects_inverted_date_range() {
        let mut config = Config::default();
        config.dashboard.start_date = NaiveDate::from_ymd_opt(2012, 1, 1);
        config.dashboard.end_date = NaiveDate::from_ymd_opt(2011, 1, 1);
        assert!(ConfigValidator::validate(&config).is_err());

        config.dashboard.end_date = config.dashboard.start_date;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_bad_dimensions_and_colors() {
        let mut config = Config::default();
        config.charts.width = 10;
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = Config::default();
        config.charts.colors.categories.push("teal".to_string());
        assert!(ConfigValidator::validate(&config).is_err());

        let mut config = Config::default();
        config.charts.colors.years.clear();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "   ".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.logging.level = "bikeshare_graphs".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "WARN".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "info,bikeshare_graphs=trace".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "bikeshare_graphs=noisy".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
