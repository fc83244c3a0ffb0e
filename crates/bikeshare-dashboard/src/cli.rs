//! Command line arguments

use std::path::PathBuf;

use bikeshare_config::{Config, CONFIG_PATH_ENV};
use chrono::NaiveDate;
use clap::Parser;

/// Generate a static dashboard from the bike sharing datasets
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Daily dataset CSV
    #[arg(long)]
    pub day_csv: Option<String>,

    /// Hourly dataset CSV
    #[arg(long)]
    pub hour_csv: Option<String>,

    /// First day of the reporting window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub start: Option<NaiveDate>,

    /// Last day of the reporting window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub end: Option<NaiveDate>,

    /// Directory receiving index.html and summary.json
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Also write summary.json
    #[arg(long)]
    pub json: bool,

    /// Log level filter, e.g. "debug" or "info,bikeshare_graphs=trace"
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Apply the arguments given on the command line over `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.day_csv {
            config.data.day_csv.clone_from(path);
        }
        if let Some(path) = &self.hour_csv {
            config.data.hour_csv.clone_from(path);
        }
        if let Some(start) = self.start {
            config.dashboard.start_date = Some(start);
        }
        if let Some(end) = self.end {
            config.dashboard.end_date = Some(end);
        }
        if let Some(dir) = &self.output_dir {
            config.dashboard.output_dir.clone_from(dir);
        }
        if self.json {
            config.dashboard.write_json = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

fn parse_cli_date(value: &str) -> Result<NaiveDate, String> {
    bikeshare_common::parse_date(value).map_err(|e| e.to_string())
}
