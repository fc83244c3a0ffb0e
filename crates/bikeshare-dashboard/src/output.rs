//! Dashboard generation pipeline and output files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bikeshare_common::{format_count, UserType};
use bikeshare_config::Config;
use bikeshare_data::{Dataset, DateRange};
use bikeshare_graphs::{RentalSummary, UserMetrics};
use tracing::{info, instrument, warn};

use crate::html::{render_page, PageContent};
use crate::sections::SectionBuilder;

/// Dashboard page file name
pub const INDEX_FILE: &str = "index.html";

/// Aggregate export file name
pub const SUMMARY_FILE: &str = "summary.json";

/// What a generation run produced
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub index_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub range: Option<DateRange>,
    pub metrics: UserMetrics,
    pub sections: usize,
    pub charts: usize,
}

impl DashboardReport {
    /// One-paragraph summary of the run
    pub fn describe(&self) -> String {
        let window = self
            .range
            .map_or_else(|| "an empty dataset".to_string(), |r| r.to_string());
        let mut text = format!(
            "Dashboard for {window}: {total} rentals ({casual} casual at {casual_share:.1}%, \
             {registered} registered at {registered_share:.1}%) across {sections} sections and {charts} charts, written to {index}",
            total = format_count(self.metrics.total),
            casual = format_count(self.metrics.casual),
            registered = format_count(self.metrics.registered),
            casual_share = self.metrics.share(UserType::Casual) * 100.0,
            registered_share = self.metrics.share(UserType::Registered) * 100.0,
            sections = self.sections,
            charts = self.charts,
            index = self.index_path.display(),
        );
        if let Some(json) = &self.json_path {
            text.push_str(&format!(" with the summary in {}", json.display()));
        }
        text
    }
}

/// Load the configured datasets and generate the dashboard
#[instrument(skip_all, fields(day = %config.data.day_csv, hour = %config.data.hour_csv))]
pub fn generate(config: &Config) -> Result<DashboardReport> {
    let dataset = Dataset::load(&config.data.day_csv, &config.data.hour_csv)
        .context("failed to load the rental datasets")?;
    generate_from(&dataset, config)
}

/// Generate the dashboard from an already loaded dataset
#[instrument(skip_all, fields(output = %config.dashboard.output_dir))]
pub fn generate_from(dataset: &Dataset, config: &Config) -> Result<DashboardReport> {
    let dashboard = &config.dashboard;
    let range = dataset
        .resolve_range(dashboard.start_date, dashboard.end_date)
        .context("invalid reporting window")?;

    if let (Some(range), Some(span)) = (range, dataset.span()) {
        if range.end() < span.start() || range.start() > span.end() {
            warn!(%range, %span, "Reporting window lies outside the data");
        }
    }

    let summary = RentalSummary::compute(dataset, range, &config.scales)
        .context("failed to aggregate the rental data")?;
    let sections = SectionBuilder::new(&summary, &config.charts).build()?;

    let page = render_page(&PageContent {
        title: &dashboard.title,
        range,
        metrics: &summary.metrics,
        holiday_metrics: &summary.holiday_metrics,
        sections: &sections,
    });

    let output_dir = Path::new(&dashboard.output_dir);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let index_path = output_dir.join(INDEX_FILE);
    write_file(&index_path, &page)?;

    let json_path = if dashboard.write_json {
        let path = output_dir.join(SUMMARY_FILE);
        let json = summary.to_json().context("failed to serialize the summary")?;
        write_file(&path, &json)?;
        Some(path)
    } else {
        None
    };

    let report = DashboardReport {
        index_path,
        json_path,
        range,
        metrics: summary.metrics,
        sections: sections.len(),
        charts: sections.iter().map(|s| s.charts.len()).sum(),
    };
    info!(sections = report.sections, charts = report.charts, "Dashboard generated");
    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(json: Option<PathBuf>) -> DashboardReport {
        DashboardReport {
            index_path: PathBuf::from("dashboard/index.html"),
            json_path: json,
            range: None,
            metrics: UserMetrics {
                casual: 4654,
                registered: 16282,
                total: 20936,
            },
            sections: 7,
            charts: 19,
        }
    }

    #[test]
    fn test_describe() {
        let text = report(None).describe();
        assert!(text.starts_with("Dashboard for an empty dataset: 20,936 rentals"));
        assert!(text.contains("4,654 casual at 22.2%, 16,282 registered at 77.8%"));
        assert!(text.contains("7 sections and 19 charts"));
        assert!(!text.contains("summary"));

        let mut empty = report(None);
        empty.metrics = UserMetrics::default();
        assert!(empty.describe().contains("0 casual at 0.0%, 0 registered at 0.0%"));

        let text = report(Some(PathBuf::from("dashboard/summary.json"))).describe();
        assert!(text.ends_with("with the summary in dashboard/summary.json"));
    }
}
