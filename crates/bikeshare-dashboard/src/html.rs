//! Self-contained HTML page: metric cards plus inline SVG charts

use bikeshare_common::format_count;
use bikeshare_data::DateRange;
use bikeshare_graphs::{HolidayMetrics, UserMetrics};

use crate::sections::{Section, HOLIDAY_SECTION};

/// Everything the page shows
#[derive(Debug, Clone, Copy)]
pub struct PageContent<'a> {
    pub title: &'a str,
    pub range: Option<DateRange>,
    pub metrics: &'a UserMetrics,
    /// Shown as cards inside the special-day users section
    pub holiday_metrics: &'a HolidayMetrics,
    pub sections: &'a [Section],
}

/// Render the dashboard page
pub fn render_page(content: &PageContent<'_>) -> String {
    let sections: String = content
        .sections
        .iter()
        .map(|section| render_section(section, content))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        {metrics}
        {sections}
        {footer}
    </div>
</body>
</html>"#,
        title = html_escape(content.title),
        css = inline_css(),
        header = render_header(content.title, content.range),
        metrics = render_metrics(content.metrics),
        sections = sections,
        footer = render_footer(),
    )
}

fn render_header(title: &str, range: Option<DateRange>) -> String {
    let range = range.map_or_else(|| "No data".to_string(), |r| r.to_string());
    format!(
        r#"<header>
    <h1>{title}</h1>
    <div class="meta">Date range: <strong>{range}</strong></div>
</header>"#,
        title = html_escape(title),
        range = html_escape(&range),
    )
}

fn metric_card(label: &str, value: u64) -> String {
    format!(
        r#"<div class="metric-card">
        <h3>{label}</h3>
        <div class="value">{value}</div>
    </div>"#,
        label = html_escape(label),
        value = format_count(value),
    )
}

/// Total, casual and registered users
fn render_metrics(metrics: &UserMetrics) -> String {
    format!(
        r#"<section id="metrics" class="metrics">
    {total}
    {casual}
    {registered}
</section>"#,
        total = metric_card("Total Users", metrics.total),
        casual = metric_card("Casual Users", metrics.casual),
        registered = metric_card("Registered Users", metrics.registered),
    )
}

fn render_holiday_cards(holiday: &HolidayMetrics) -> String {
    format!(
        r#"<div class="metrics">
    {holiday_casual}
    {holiday_registered}
    {regular_casual}
    {regular_registered}
</div>"#,
        holiday_casual = metric_card("Casual Users on Holidays", holiday.holiday.casual),
        holiday_registered = metric_card("Registered Users on Holidays", holiday.holiday.registered),
        regular_casual = metric_card("Casual Users on Non-Holidays", holiday.non_holiday.casual),
        regular_registered = metric_card(
            "Registered Users on Non-Holidays",
            holiday.non_holiday.registered
        ),
    )
}

fn render_section(section: &Section, content: &PageContent<'_>) -> String {
    let cards = if section.id == HOLIDAY_SECTION {
        render_holiday_cards(content.holiday_metrics)
    } else {
        String::new()
    };
    let charts: String = section
        .charts
        .iter()
        .map(|chart| {
            format!(
                r#"<figure id="{id}" class="chart">
        {svg}
        <figcaption>{title}</figcaption>
    </figure>
    "#,
                id = html_escape(&chart.id),
                svg = chart.svg,
                title = html_escape(&chart.title),
            )
        })
        .collect();

    format!(
        r#"<section id="{id}">
    <h2>{title}</h2>
    {cards}
    <div class="charts">
    {charts}</div>
</section>
"#,
        id = section.id,
        title = html_escape(section.title),
    )
}

fn render_footer() -> String {
    format!(
        r#"<footer>Generated by bikeshare-dashboard {version}</footer>"#,
        version = env!("CARGO_PKG_VERSION"),
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: sans-serif; margin: 0; background: #f5f6f8; color: #222; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
header h1 { margin-bottom: 4px; }
.meta { color: #666; }
.metrics { display: flex; gap: 16px; margin: 24px 0; flex-wrap: wrap; }
.metric-card { flex: 1; min-width: 180px; background: #fff; border-radius: 8px; padding: 16px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.metric-card h3 { margin: 0 0 8px; font-size: 14px; color: #555; font-weight: normal; }
.metric-card .value { font-size: 28px; font-weight: bold; }
section h2 { border-bottom: 2px solid #1f77b4; padding-bottom: 4px; }
.charts { display: flex; flex-direction: column; gap: 24px; }
.chart { margin: 0; background: #fff; border-radius: 8px; padding: 8px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.chart svg { max-width: 100%; height: auto; }
.chart figcaption { text-align: center; color: #666; font-size: 13px; }
footer { margin-top: 32px; color: #999; font-size: 12px; text-align: center; }
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
