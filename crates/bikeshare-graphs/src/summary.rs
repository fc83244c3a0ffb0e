//! Every aggregate of one reporting window, computed in a single pass over
//! the filtered snapshot.

use bikeshare_common::Result;
use bikeshare_config::ScaleConfig;
use bikeshare_data::{Dataset, DateRange};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::aggregator::{self, CategoryTotal, MonthlyTotal, UserSplit, YearSeries};
use crate::factors::{bucketize_all, FactorBuckets};
use crate::metrics::{HolidayMetrics, UserMetrics};

/// Aggregated view of the dataset over a date range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalSummary {
    /// Window the summary covers; `None` when the dataset is empty
    pub range: Option<DateRange>,
    pub metrics: UserMetrics,
    pub holiday_metrics: HolidayMetrics,
    pub by_season: Vec<CategoryTotal>,
    pub by_weekday: Vec<CategoryTotal>,
    pub by_month: Vec<CategoryTotal>,
    pub by_weather: Vec<CategoryTotal>,
    pub by_holiday: Vec<CategoryTotal>,
    pub by_workingday: Vec<CategoryTotal>,
    pub by_hour: Vec<CategoryTotal>,
    pub users_by_hour: Vec<UserSplit>,
    pub users_by_weekday: Vec<UserSplit>,
    pub users_by_month: Vec<UserSplit>,
    pub users_by_holiday: Vec<UserSplit>,
    pub daily_by_year: Vec<YearSeries>,
    pub monthly_mean_by_year: Vec<YearSeries>,
    pub hourly_mean_by_year: Vec<YearSeries>,
    pub monthly_timeline: Vec<MonthlyTotal>,
    pub environment: Vec<FactorBuckets>,
}

impl RentalSummary {
    /// Filter `dataset` to `range` (when given) and aggregate the result.
    ///
    /// Fails only when a scale is invalid; an empty window yields zeros.
    #[instrument(skip_all, fields(range = ?range))]
    pub fn compute(dataset: &Dataset, range: Option<DateRange>, scales: &ScaleConfig) -> Result<Self> {
        let filtered = match &range {
            Some(range) => dataset.filter(range),
            None => dataset.clone(),
        };
        let days = filtered.daily();
        let hours = filtered.hourly();

        let summary = Self {
            range,
            metrics: UserMetrics::from_records(days),
            holiday_metrics: HolidayMetrics::from_records(days),
            by_season: aggregator::total_by_season(days),
            by_weekday: aggregator::total_by_weekday(days),
            by_month: aggregator::total_by_month(days),
            by_weather: aggregator::total_by_weather(days),
            by_holiday: aggregator::total_by_holiday(days),
            by_workingday: aggregator::total_by_workingday(days),
            by_hour: aggregator::total_by_hour(hours),
            users_by_hour: aggregator::users_by_hour(hours),
            users_by_weekday: aggregator::users_by_weekday(days),
            users_by_month: aggregator::users_by_month(days),
            users_by_holiday: aggregator::users_by_holiday(days),
            daily_by_year: aggregator::daily_series_by_year(days),
            monthly_mean_by_year: aggregator::monthly_mean_by_year(days),
            hourly_mean_by_year: aggregator::hourly_mean_by_year(hours),
            monthly_timeline: aggregator::monthly_timeline(days),
            environment: bucketize_all(days, scales)?,
        };

        debug!(
            days = days.len(),
            hours = hours.len(),
            total = summary.metrics.total,
            "Computed rental summary"
        );
        Ok(summary)
    }

    /// Buckets of one environmental factor
    pub fn factor(&self, factor: crate::EnvironmentalFactor) -> Option<&FactorBuckets> {
        self.environment.iter().find(|f| f.factor == factor)
    }

    /// Pretty-printed JSON of the whole summary
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
