//! Configuration loading utilities

use crate::validator::ConfigValidator;
use crate::Config;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BIKESHARE_CONFIG_PATH";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bikeshare.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading or writing a configuration file
    #[error("Failed to access configuration file {path}: {source}")]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Configuration validation error
    #[error("Invalid configuration value for '{field}': {message}")]
    Validation {
        /// Dotted path of the offending key
        field: String,
        /// Description of the problem
        message: String,
    },

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// Create a validation error for a config field
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<ConfigError> for bikeshare_common::BikeshareError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, message } => {
                bikeshare_common::BikeshareError::validation_field(message, field)
            }
            other => bikeshare_common::BikeshareError::config(other.to_string()),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `path`, else `$BIKESHARE_CONFIG_PATH`, else
    /// `bikeshare.toml`, falling back to defaults. Environment overrides are
    /// applied last.
    ///
    /// The result is not validated yet; callers validate once every override
    /// (including command-line arguments) is in place.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));
        Self::load_with(explicit.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load with an explicit path and environment lookup, without validating.
    ///
    /// A missing explicit path is an error; a missing `bikeshare.toml` is not.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::read_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides_from(&mut config, lookup)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to a file atomically
    pub fn save<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        ConfigValidator::validate(config)?;
        let content = toml::to_string_pretty(config)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::io(dir, e))?;

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConfigError::io(dir, e))?;
        temp.write_all(content.as_bytes())
            .map_err(|e| ConfigError::io(temp.path(), e))?;
        temp.persist(path)
            .map_err(|e| ConfigError::io(path, e.error))?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides from the given lookup
    pub fn apply_env_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BIKESHARE_DAY_CSV") {
            config.data.day_csv = path;
        }

        if let Some(path) = lookup("BIKESHARE_HOUR_CSV") {
            config.data.hour_csv = path;
        }

        if let Some(dir) = lookup("BIKESHARE_OUTPUT_DIR") {
            config.dashboard.output_dir = dir;
        }

        if let Some(level) = lookup("BIKESHARE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(width) = lookup("BIKESHARE_CHART_WIDTH") {
            config.charts.width = parse_env("BIKESHARE_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("BIKESHARE_CHART_HEIGHT") {
            config.charts.height = parse_env("BIKESHARE_CHART_HEIGHT", &height)?;
        }

        Ok(())
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse::<T>().map_err(|e: T::Err| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}
