//! Bikeshare dashboard generator - main entry point

use anyhow::{Context, Result};
use bikeshare_common::init_logging;
use bikeshare_config::{ConfigLoader, ConfigValidator};
use bikeshare_dashboard::{generate, Cli};
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // File and environment first, arguments last, then validate once
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    ConfigValidator::validate(&config).context("invalid configuration")?;

    init_logging(&config.logging).context("failed to initialize logging")?;
    info!(
        day = %config.data.day_csv,
        hour = %config.data.hour_csv,
        output = %config.dashboard.output_dir,
        "Starting dashboard generation"
    );

    let report = generate(&config)?;
    info!("{}", report.describe());
    println!("{}", report.index_path.display());
    Ok(())
}
