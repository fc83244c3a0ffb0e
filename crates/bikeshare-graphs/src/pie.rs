//! Pie chart renderer with percentage labels

use bikeshare_common::Result;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::debug;

use crate::renderer::{draw_no_data, pick_color, render_to_string};
use crate::{DataPoint, DataSet, GraphConfig, GraphRenderer};

/// Pie chart renderer; slices come from the first dataset
#[derive(Debug, Default, Clone, Copy)]
pub struct PieChartRenderer;

impl PieChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Slices with a positive value, paired with their position in the dataset
    fn slices<'a>(&self, datasets: &'a [DataSet]) -> Vec<(usize, &'a DataPoint)> {
        datasets
            .first()
            .map(|d| {
                d.data
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.y > 0.0)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl GraphRenderer for PieChartRenderer {
    fn name(&self) -> &'static str {
        "pie"
    }

    fn render_svg(&self, config: &GraphConfig, datasets: &[DataSet]) -> Result<String> {
        let slices = self.slices(datasets);
        let palette = self.get_colors(&config.style.color_scheme);

        // Colors follow the slice's position so a missing slice keeps the others stable
        let sizes: Vec<f64> = slices.iter().map(|(_, p)| p.y).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|(i, _)| pick_color(&palette, *i)).collect();
        let labels: Vec<String> = slices
            .iter()
            .map(|(i, p)| p.label.clone().unwrap_or_else(|| format!("#{}", i + 1)))
            .collect();

        let svg = render_to_string(config.width, config.height, |root| {
            root.fill(&self.get_background_color(config))?;

            let style = &config.style;
            let area = root.titled(
                &config.title,
                (style.title_font.family.as_str(), style.title_font.size),
            )?;

            if sizes.is_empty() {
                return draw_no_data(&area, config);
            }

            let (width, height) = area.dim_in_pixel();
            #[allow(clippy::cast_possible_wrap)]
            let center = ((width / 2) as i32, (height / 2) as i32);
            let radius = f64::from(width.min(height)) * 0.35;

            let label_color = RGBColor(40, 40, 40);
            let label_font = (
                style.label_font.family.as_str(),
                f64::from(style.label_font.size),
            );
            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(-90.0);
            pie.label_style(TextStyle::from(label_font).color(&label_color));
            pie.label_offset(radius * 0.15);
            pie.percentages(TextStyle::from(label_font).color(&WHITE));
            area.draw(&pie)?;
            Ok(())
        })?;

        debug!(title = %config.title, slices = sizes.len(), "Rendered pie chart");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphType;

    fn shares(values: &[(&str, f64)]) -> DataSet {
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
    fn test_zero_slices_are_skipped() {
        let renderer = PieChartRenderer::new();
        let datasets = [shares(&[("Non-Holiday", 12533.0), ("Holiday", 0.0)])];
        let slices = renderer.slices(&datasets);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].0, 0);
        assert!(renderer.slices(&[]).is_empty());
    }

    #[test]
    fn test_render_pie_with_labels() {
        let config = GraphConfig::new(GraphType::Pie, "Rentals on holidays");
        let svg = PieChartRenderer::new()
            .render_svg(&config, &[shares(&[("Non-Holiday", 12533.0), ("Holiday", 8403.0)])])
            .unwrap();

        assert!(svg.contains("Rentals on holidays"));
        assert!(svg.contains("Non-Holiday"));
        assert!(svg.contains("Holiday"));
        assert!(svg.contains('%'));
    }

    #[test]
    fn test_render_all_zero_is_empty_chart() {
        let config = GraphConfig::new(GraphType::Pie, "Working days");
        let svg = PieChartRenderer::new()
            .render_svg(&config, &[shares(&[("Non-Working Day", 0.0), ("Working Day", 0.0)])])
            .unwrap();
        assert!(svg.contains("No data"));
    }
}
