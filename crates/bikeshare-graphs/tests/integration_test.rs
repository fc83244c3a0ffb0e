//! End-to-end tests: CSV fixtures through aggregation to rendered SVG

use bikeshare_common::test_utils::{create_temp_dir, init_test_logging, write_sample_datasets};
use bikeshare_config::ScaleConfig;
use bikeshare_data::{Dataset, DateRange};
use bikeshare_graphs::{
    BarChartRenderer, DataSet, EnvironmentalFactor, GraphConfig, GraphRenderer, GraphType,
    LineChartRenderer, PieChartRenderer, RentalSummary,
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn load_sample() -> Dataset {
    let dir = create_temp_dir();
    let (day, hour) = write_sample_datasets(dir.path());
    Dataset::load(day, hour).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_summary_over_loaded_files() {
    init_test_logging();
    let dataset = load_sample();
    let range = dataset.resolve_range(None, None).unwrap();
    let summary = RentalSummary::compute(&dataset, range, &ScaleConfig::default()).unwrap();

    assert_eq!(summary.metrics.total, 20936);
    assert_eq!(summary.metrics.casual + summary.metrics.registered, summary.metrics.total);

    let temperature = summary.factor(EnvironmentalFactor::Temperature).unwrap();
    let labels: Vec<&str> = temperature.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["0-8", "8-16", "16-24", "24-32", "32-41"]);
}

#[test]
fn test_range_outside_data_yields_zero_users() {
    let dataset = load_sample();
    let range = DateRange::new(date(2013, 1, 1), date(2013, 6, 30)).unwrap();
    let summary = RentalSummary::compute(&dataset, Some(range), &ScaleConfig::default()).unwrap();

    assert_eq!(summary.metrics.total, 0);
    assert_eq!(summary.metrics.casual, 0);
    assert_eq!(summary.metrics.registered, 0);
    assert_eq!(summary.by_month.len(), 12);
    assert_eq!(summary.by_hour.len(), 24);
}

#[test]
fn test_charts_render_from_summary() {
    let dataset = load_sample();
    let summary = RentalSummary::compute(&dataset, None, &ScaleConfig::default()).unwrap();

    let bar = BarChartRenderer::new()
        .render_svg(
            &GraphConfig::new(GraphType::Bar, "Rentals by season"),
            &[DataSet::from_totals("Rentals", &summary.by_season)],
        )
        .unwrap();
    assert!(bar.contains("Winter"));

    let pie = PieChartRenderer::new()
        .render_svg(
            &GraphConfig::new(GraphType::Pie, "Working days"),
            &[DataSet::from_totals("Rentals", &summary.by_workingday)],
        )
        .unwrap();
    assert!(pie.contains("Working Day"));

    let lines: Vec<DataSet> = summary
        .monthly_mean_by_year
        .iter()
        .map(|s| DataSet::from_series(s.year.to_string(), &s.points))
        .collect();
    let line = LineChartRenderer::new()
        .render_svg(&GraphConfig::new(GraphType::Line, "Mean rentals by month"), &lines)
        .unwrap();
    assert!(line.contains("2012"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_user_metrics_add_up_for_any_window(start in 0i64..800, len in 0i64..800) {
        let dataset = load_sample();
        let first = date(2010, 12, 1) + Duration::days(start);
        let range = DateRange::new(first, first + Duration::days(len)).unwrap();
        let summary = RentalSummary::compute(&dataset, Some(range), &ScaleConfig::default()).unwrap();

        let expected: u64 = dataset.filter(&range).daily().iter().map(|r| r.total).sum();
        prop_assert_eq!(summary.metrics.casual + summary.metrics.registered, summary.metrics.total);
        prop_assert_eq!(summary.metrics.total, expected);
        prop_assert_eq!(summary.by_season.iter().map(|c| c.total).sum::<u64>(), expected);
    }
}
