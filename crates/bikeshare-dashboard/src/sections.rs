//! Dashboard sections: which charts appear, in which order, with which data

use anyhow::{Context, Result};
use bikeshare_config::ChartsConfig;
use bikeshare_graphs::{
    BarChartRenderer, CategoryTotal, ColorScheme, DataPoint, DataSet, EnvironmentalFactor,
    GraphConfig, GraphRenderer, GraphType, LineChartRenderer, PieChartRenderer, RentalSummary,
    UserSplit, YearSeries,
};
use serde::Serialize;
use tracing::{debug, instrument};

/// Id of the section listing casual and registered users on holidays
pub const HOLIDAY_SECTION: &str = "special-day-users";

/// One rendered chart
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    /// Anchor id, unique within the page
    pub id: String,
    pub title: String,
    #[serde(skip)]
    pub svg: String,
}

/// A titled group of charts
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
    pub charts: Vec<Chart>,
}

/// Chart request before rendering
struct ChartPlan {
    id: &'static str,
    config: GraphConfig,
    datasets: Vec<DataSet>,
}

/// Builds every enabled section from a computed summary
pub struct SectionBuilder<'a> {
    summary: &'a RentalSummary,
    charts: &'a ChartsConfig,
}

impl<'a> SectionBuilder<'a> {
    pub fn new(summary: &'a RentalSummary, charts: &'a ChartsConfig) -> Self {
        Self { summary, charts }
    }

    /// Render the enabled sections in page order
    #[instrument(skip_all)]
    pub fn build(&self) -> Result<Vec<Section>> {
        let sections = &self.charts.sections;
        let plan: [(bool, &'static str, &'static str, fn(&Self) -> Vec<ChartPlan>); 7] = [
            (
                sections.monthly_performance,
                "monthly-performance",
                "Rental Performance Over the Months",
                Self::monthly_performance,
            ),
            (
                sections.time_performance,
                "time-performance",
                "Rental Performance Over Time",
                Self::time_performance,
            ),
            (sections.special_days, "special-days", "Special Days", Self::special_days),
            (
                sections.environment,
                "environment",
                "Environmental Factors",
                Self::environment,
            ),
            (sections.hourly, "hourly", "Hourly Performance", Self::hourly),
            (
                sections.user_patterns,
                "user-patterns",
                "User Patterns",
                Self::user_patterns,
            ),
            (
                sections.special_day_metrics,
                HOLIDAY_SECTION,
                "Users on Special Days",
                Self::special_day_users,
            ),
        ];

        let mut built = Vec::with_capacity(plan.len());
        for (enabled, id, title, charts_for) in plan {
            if !enabled {
                debug!(section = id, "Section disabled");
                continue;
            }
            let charts = charts_for(self)
                .into_iter()
                .map(|chart| render(chart).with_context(|| format!("failed to render section '{title}'")))
                .collect::<Result<Vec<_>>>()?;
            debug!(section = id, charts = charts.len(), "Section rendered");
            built.push(Section { id, title, charts });
        }
        Ok(built)
    }

    fn config(&self, graph_type: GraphType, title: &str, x: &str, y: &str) -> GraphConfig {
        GraphConfig::themed(graph_type, title, self.charts).with_axis_labels(x, y)
    }

    /// One series per year, colored from the year palette
    fn year_datasets(&self, series: &[YearSeries]) -> Vec<DataSet> {
        let palette = &self.charts.colors.years;
        series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let set = DataSet::from_series(s.year.to_string(), &s.points);
                match palette.get(i % palette.len().max(1)) {
                    Some(color) => set.with_color(color.clone()),
                    None => set,
                }
            })
            .collect()
    }

    fn split_datasets(&self, splits: &[UserSplit]) -> Vec<DataSet> {
        let colors = &self.charts.colors;
        let [casual, registered] = DataSet::from_splits(splits);
        vec![
            casual.with_color(colors.casual.clone()),
            registered.with_color(colors.registered.clone()),
        ]
    }

    fn bars(&self, id: &'static str, title: &str, x: &str, totals: &[CategoryTotal]) -> ChartPlan {
        ChartPlan {
            id,
            config: self.config(GraphType::Bar, title, x, "Total Rentals"),
            datasets: vec![DataSet::from_totals("Rentals", totals)],
        }
    }

    /// Pies take the primary and casual colors so two slices contrast
    fn pie(&self, id: &'static str, title: &str, totals: &[CategoryTotal]) -> ChartPlan {
        let colors = &self.charts.colors;
        ChartPlan {
            id,
            config: self.config(GraphType::Pie, title, "", "").with_color_scheme(ColorScheme::Custom(vec![
                colors.primary.clone(),
                colors.casual.clone(),
            ])),
            datasets: vec![DataSet::from_totals("Rentals", totals)],
        }
    }

    fn monthly_performance(&self) -> Vec<ChartPlan> {
        let summary = self.summary;
        #[allow(clippy::cast_precision_loss)]
        let timeline = summary
            .monthly_timeline
            .iter()
            .enumerate()
            .map(|(i, m)| DataPoint::labeled(i as f64, m.total as f64, m.label.clone()))
            .collect();
        vec![
            ChartPlan {
                id: "daily-rentals",
                config: self.config(GraphType::Line, "Daily Rentals by Year", "Date", "Total Rentals"),
                datasets: self.year_datasets(&summary.daily_by_year),
            },
            ChartPlan {
                id: "monthly-mean",
                config: self.config(
                    GraphType::Line,
                    "Average Daily Rentals by Month",
                    "Month",
                    "Average Rentals",
                ),
                datasets: self.year_datasets(&summary.monthly_mean_by_year),
            },
            ChartPlan {
                id: "monthly-timeline",
                config: self.config(GraphType::Line, "Monthly Rentals", "Month", "Total Rentals"),
                datasets: vec![DataSet::new("Rentals", timeline).with_color(self.charts.colors.primary.clone())],
            },
        ]
    }

    fn time_performance(&self) -> Vec<ChartPlan> {
        let summary = self.summary;
        vec![
            self.bars("by-month", "Rentals by Month", "Month", &summary.by_month),
            self.bars("by-season", "Rentals by Season", "Season", &summary.by_season),
            self.bars("by-weekday", "Rentals by Weekday", "Weekday", &summary.by_weekday),
        ]
    }

    fn special_days(&self) -> Vec<ChartPlan> {
        let summary = self.summary;
        vec![
            self.pie("by-holiday", "Rentals on Holidays", &summary.by_holiday),
            self.pie("by-workingday", "Rentals on Working Days", &summary.by_workingday),
        ]
    }

    fn environment(&self) -> Vec<ChartPlan> {
        let summary = self.summary;
        let bucket_chart = |factor: EnvironmentalFactor, id: &'static str| {
            let buckets = summary.factor(factor).map(|f| f.buckets.as_slice()).unwrap_or_default();
            let x = format!("{} ({})", factor.name(), factor.unit());
            ChartPlan {
                id,
                config: self.config(GraphType::Bar, &format!("Rentals by {}", factor.name()), &x, "Total Rentals"),
                datasets: vec![DataSet::from_buckets("Rentals", buckets)],
            }
        };
        vec![
            bucket_chart(EnvironmentalFactor::Temperature, "by-temperature"),
            bucket_chart(EnvironmentalFactor::FeelingTemperature, "by-feeling-temperature"),
            self.bars("by-weather", "Rentals by Weather Situation", "Weather", &summary.by_weather),
            bucket_chart(EnvironmentalFactor::Humidity, "by-humidity"),
            bucket_chart(EnvironmentalFactor::Windspeed, "by-windspeed"),
        ]
    }

    fn hourly(&self) -> Vec<ChartPlan> {
        let summary = self.summary;
        vec![
            ChartPlan {
                id: "by-hour",
                config: self.config(GraphType::Line, "Hourly Rentals", "Hour", "Total Rentals"),
                datasets: vec![DataSet::from_totals("Rentals", &summary.by_hour)
                    .with_color(self.charts.colors.primary.clone())],
            },
            ChartPlan {
                id: "hourly-mean",
                config: self.config(GraphType::Line, "Average Rentals by Hour", "Hour", "Average Rentals"),
                datasets: self.year_datasets(&summary.hourly_mean_by_year),
            },
        ]
    }

    fn user_patterns(&self) -> Vec<ChartPlan> {
        let summary = self.summary;
        let lines = |id: &'static str, title: &str, x: &str, splits: &[UserSplit]| ChartPlan {
            id,
            config: self.config(GraphType::Line, title, x, "Rentals"),
            datasets: self.split_datasets(splits),
        };
        vec![
            lines("users-by-hour", "Casual vs Registered by Hour", "Hour", &summary.users_by_hour),
            lines(
                "users-by-weekday",
                "Casual vs Registered by Weekday",
                "Weekday",
                &summary.users_by_weekday,
            ),
            lines("users-by-month", "Casual vs Registered by Month", "Month", &summary.users_by_month),
        ]
    }

    fn special_day_users(&self) -> Vec<ChartPlan> {
        vec![ChartPlan {
            id: "users-by-holiday",
            config: self.config(GraphType::Bar, "Casual vs Registered on Holidays", "Day Type", "Rentals"),
            datasets: self.split_datasets(&self.summary.users_by_holiday),
        }]
    }
}

fn render(plan: ChartPlan) -> Result<Chart> {
    let ChartPlan { id, config, datasets } = plan;
    let renderer: &dyn GraphRenderer = match config.graph_type {
        GraphType::Line => &LineChartRenderer,
        GraphType::Bar => &BarChartRenderer,
        GraphType::Pie => &PieChartRenderer,
    };
    let svg = renderer
        .render_svg(&config, &datasets)
        .with_context(|| format!("failed to render chart '{id}'"))?;
    debug!(chart = id, renderer = renderer.name(), bytes = svg.len(), "Chart rendered");

    Ok(Chart {
        id: id.to_string(),
        title: config.title,
        svg,
    })
}
