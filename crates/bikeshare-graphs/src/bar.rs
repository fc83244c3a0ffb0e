//! Categorical bar chart renderer.
//!
//! A single dataset draws one bar per category, each category taking the
//! next color of the palette. Several datasets draw grouped bars, one color
//! per dataset, with a legend.

use bikeshare_common::Result;
use plotters::prelude::*;
use tracing::debug;

use crate::renderer::{draw_no_data, format_axis_value, pick_color, render_to_string};
use crate::{DataSet, GraphConfig, GraphRenderer};

/// Share of each category slot covered by bars
const GROUP_WIDTH: f64 = 0.8;

/// Bar chart renderer for categorical aggregates
#[derive(Debug, Default, Clone, Copy)]
pub struct BarChartRenderer;

impl BarChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Category labels, taken from the first dataset carrying labels
    fn category_labels(&self, datasets: &[DataSet]) -> Vec<String> {
        let count = self.category_count(datasets);
        let labeled = datasets
            .iter()
            .find(|d| d.data.iter().any(|p| p.label.is_some()));
        (0..count)
            .map(|i| {
                labeled
                    .and_then(|d| d.data.get(i))
                    .and_then(|p| p.label.clone())
                    .unwrap_or_else(|| i.to_string())
            })
            .collect()
    }

    fn category_count(&self, datasets: &[DataSet]) -> usize {
        datasets.iter().map(|d| d.data.len()).max().unwrap_or(0)
    }

    /// Get max value for y-axis scaling
    fn get_max_value(&self, datasets: &[DataSet]) -> f64 {
        let max = datasets
            .iter()
            .flat_map(|d| &d.data)
            .map(|p| p.y)
            .fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1 // Add 10% padding
        } else {
            1.0
        }
    }

    /// Horizontal extent of bar `series` out of `series_count` in `category`
    #[allow(clippy::cast_precision_loss)]
    fn bar_span(category: usize, series: usize, series_count: usize) -> (f64, f64) {
        let width = GROUP_WIDTH / series_count.max(1) as f64;
        let left = category as f64 - GROUP_WIDTH / 2.0 + series as f64 * width;
        (left, left + width)
    }
}

impl GraphRenderer for BarChartRenderer {
    fn name(&self) -> &'static str {
        "bar"
    }

    fn render_svg(&self, config: &GraphConfig, datasets: &[DataSet]) -> Result<String> {
        let labels = self.category_labels(datasets);
        let max_value = self.get_max_value(datasets);
        #[allow(clippy::cast_precision_loss)]
        let x_end = labels.len().max(1) as f64 - 0.5;

        let x_formatter = |x: &f64| {
            let index = x.round();
            if (x - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = index as usize;
            labels.get(index).cloned().unwrap_or_default()
        };
        let y_formatter = |y: &f64| format_axis_value(*y);

        let svg = render_to_string(config.width, config.height, |root| {
            root.fill(&self.get_background_color(config))?;

            let style = &config.style;
            let title_font = (style.title_font.family.as_str(), style.title_font.size);
            let mut chart = ChartBuilder::on(root)
                .caption(&config.title, title_font)
                .margin(style.margins.top)
                .x_label_area_size(style.margins.bottom)
                .y_label_area_size(style.margins.left)
                .build_cartesian_2d(-0.5..x_end, 0.0..max_value)?;

            let mut mesh = chart.configure_mesh();
            mesh.disable_x_mesh()
                .x_labels(labels.len().max(1))
                .x_label_formatter(&x_formatter)
                .y_label_formatter(&y_formatter)
                .x_desc(config.x_label.as_deref().unwrap_or(""))
                .y_desc(config.y_label.as_deref().unwrap_or(""))
                .label_style((style.axis_font.family.as_str(), style.axis_font.size));
            if !style.grid.show_y {
                mesh.disable_y_mesh();
            }
            if let Some(color) = style.grid.color.as_deref().map(|c| self.parse_color(c)) {
                mesh.bold_line_style(color.mix(0.3)).light_line_style(color.mix(0.1));
            }
            mesh.draw()?;

            let palette = self.get_colors(&style.color_scheme);
            let series_count = datasets.len();

            for (j, dataset) in datasets.iter().enumerate() {
                let series_color = self.series_color(config, dataset, j);
                let bars = dataset.data.iter().enumerate().map(|(i, point)| {
                    // A lone series colors each category from the palette
                    let color = if series_count == 1 && dataset.color.is_none() {
                        pick_color(&palette, i)
                    } else {
                        series_color
                    };
                    let (left, right) = Self::bar_span(i, j, series_count);
                    Rectangle::new([(left, 0.0), (right, point.y)], color.filled())
                });
                let anno = chart.draw_series(bars)?;
                if series_count > 1 {
                    anno.label(dataset.name.as_str()).legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], series_color.filled())
                    });
                }
            }

            if series_count > 1 {
                chart
                    .configure_series_labels()
                    .label_font((style.label_font.family.as_str(), style.label_font.size))
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()?;
            }

            if labels.is_empty() {
                draw_no_data(root, config)?;
            }
            Ok(())
        })?;

        debug!(
            title = %config.title,
            categories = labels.len(),
            series = datasets.len(),
            "Rendered bar chart"
        );
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorScheme, DataPoint, GraphType};

    fn categories(values: &[(&str, f64)]) -> DataSet {
        DataSet::new(
            "Rentals",
            values
                .iter()
                .enumerate()
                .map(|(i, (label, y))| DataPoint::labeled(i as f64, *y, *label))
                .collect(),
        )
    }

    #[test]
    fn test_category_labels() {
        let renderer = BarChartRenderer::new();
        let labels = renderer.category_labels(&[categories(&[("Spring", 1.0), ("Summer", 2.0)])]);
        assert_eq!(labels, vec!["Spring", "Summer"]);

        let unlabeled = DataSet::new("s", vec![DataPoint::new(0.0, 1.0)]);
        assert_eq!(renderer.category_labels(&[unlabeled]), vec!["0"]);
        assert!(renderer.category_labels(&[]).is_empty());
    }

    #[test]
    fn test_get_max_value() {
        let renderer = BarChartRenderer::new();
        assert_eq!(renderer.get_max_value(&[]), 1.0);
        let max = renderer.get_max_value(&[categories(&[("a", 10.0), ("b", 20.0)])]);
        assert!((max - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_bar_spans_are_grouped_within_slot() {
        assert_eq!(BarChartRenderer::bar_span(0, 0, 1), (-0.4, 0.4));
        let (l0, r0) = BarChartRenderer::bar_span(2, 0, 2);
        let (l1, r1) = BarChartRenderer::bar_span(2, 1, 2);
        assert!((l0 - 1.6).abs() < 1e-9);
        assert!((r0 - l1).abs() < 1e-9);
        assert!((r1 - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_render_single_series_uses_palette() {
        let config = GraphConfig::new(GraphType::Bar, "Rentals by season")
            .with_color_scheme(ColorScheme::Custom(vec!["#ccebc5".into(), "#084081".into()]));
        let svg = BarChartRenderer::new()
            .render_svg(&config, &[categories(&[("Spring", 9426.0), ("Summer", 5107.0)])])
            .unwrap();

        assert!(svg.contains("Rentals by season"));
        assert!(svg.contains("Spring"));
        assert!(svg.contains("#CCEBC5") || svg.contains("#ccebc5"));
        assert!(svg.contains("#084081"));
    }

    #[test]
    fn test_render_grouped_series() {
        let config = GraphConfig::new(GraphType::Bar, "Users by weekday");
        let casual = categories(&[("Sunday", 131.0), ("Monday", 676.0)]);
        let mut registered = categories(&[("Sunday", 670.0), ("Monday", 4402.0)]);
        registered.name = "Registered".into();
        let svg = BarChartRenderer::new()
            .render_svg(&config, &[casual, registered])
            .unwrap();
        assert!(svg.contains("Registered"));
        assert!(svg.contains("Monday"));
    }

    #[test]
    fn test_render_empty_chart() {
        let svg = BarChartRenderer::new()
            .render_svg(&GraphConfig::new(GraphType::Bar, "Empty"), &[])
            .unwrap();
        assert!(svg.contains("No data"));
    }
}
