//! Chart rendering trait and the line chart implementation

use std::ops::Range;

use bikeshare_common::{format_count, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::{ColorScheme, DataSet, GraphConfig};

/// Trait for rendering charts to SVG with shared styling helpers
pub trait GraphRenderer {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Render the chart as an SVG document
    fn render_svg(&self, config: &GraphConfig, datasets: &[DataSet]) -> Result<String>;

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
                RGBColor(188, 189, 34),  // Olive
                RGBColor(23, 190, 207),  // Cyan
            ],
            ColorScheme::Blues => vec![
                RGBColor(198, 219, 239),
                RGBColor(158, 202, 225),
                RGBColor(107, 174, 214),
                RGBColor(66, 146, 198),
                RGBColor(33, 113, 181),
                RGBColor(8, 81, 156),
                RGBColor(8, 48, 107),
            ],
            ColorScheme::GnBu => vec![
                RGBColor(204, 235, 197),
                RGBColor(168, 221, 181),
                RGBColor(123, 204, 196),
                RGBColor(78, 179, 211),
                RGBColor(43, 140, 190),
                RGBColor(8, 104, 172),
                RGBColor(8, 64, 129),
            ],
            ColorScheme::Custom(colors) => colors
                .iter()
                .map(|color_str| self.parse_color(color_str))
                .collect(),
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }

    /// Color of the `index`-th series; an explicit dataset color wins
    fn series_color(&self, config: &GraphConfig, dataset: &DataSet, index: usize) -> RGBColor {
        match &dataset.color {
            Some(color) => self.parse_color(color),
            None => pick_color(&self.get_colors(&config.style.color_scheme), index),
        }
    }
}

/// Cycle through `palette`, falling back to blue when it is empty
pub(crate) fn pick_color(palette: &[RGBColor], index: usize) -> RGBColor {
    if palette.is_empty() {
        RGBColor(31, 119, 180)
    } else {
        palette[index % palette.len()]
    }
}

/// Run `draw` against an in-memory SVG surface and return the document
pub(crate) fn render_to_string<F>(width: u32, height: u32, draw: F) -> Result<String>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> Result<()>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        draw(&root)?;
        root.present()?;
    }
    Ok(svg)
}

/// Centered "No data" notice for charts without any points
pub(crate) fn draw_no_data(area: &DrawingArea<SVGBackend<'_>, Shift>, config: &GraphConfig) -> Result<()> {
    let (width, height) = area.dim_in_pixel();
    let color = RGBColor(120, 120, 120);
    let style = TextStyle::from((
        config.style.label_font.family.as_str(),
        f64::from(config.style.title_font.size),
    ))
    .color(&color)
    .pos(Pos::new(HPos::Center, VPos::Center));
    #[allow(clippy::cast_possible_wrap)]
    let center = ((width / 2) as i32, (height / 2) as i32);
    area.draw(&Text::new("No data".to_string(), center, style))?;
    Ok(())
}

/// Axis tick text: thousands separators for large whole numbers
pub(crate) fn format_axis_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        if value >= 1000.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = value.round() as u64;
            return format_count(whole);
        }
        return format!("{value:.0}");
    }
    format!("{value:.1}")
}

/// Concrete implementation of GraphRenderer for line charts
#[derive(Debug, Default, Clone, Copy)]
pub struct LineChartRenderer;

impl LineChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the padded data ranges for all datasets
    fn calculate_data_ranges(&self, datasets: &[DataSet]) -> (Range<f64>, Range<f64>) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;

        for point in datasets.iter().flat_map(|d| &d.data) {
            x_min = x_min.min(point.x);
            x_max = x_max.max(point.x);
            y_min = y_min.min(point.y);
            y_max = y_max.max(point.y);
        }

        if !x_min.is_finite() {
            return (0.0..1.0, 0.0..1.0);
        }

        let x_range = if x_max > x_min {
            let pad = (x_max - x_min) * 0.02;
            (x_min - pad)..(x_max + pad)
        } else {
            (x_min - 0.5)..(x_max + 0.5)
        };

        // Counts are anchored at zero
        let y_low = y_min.min(0.0);
        let y_high = if y_max > y_low { y_max + (y_max - y_low) * 0.05 } else { y_low + 1.0 };

        (x_range, y_low..y_high)
    }
}

/// Distinct labeled x positions across every dataset, sorted by x
fn tick_labels(datasets: &[DataSet]) -> Vec<(f64, String)> {
    let mut ticks: Vec<(f64, String)> = datasets
        .iter()
        .flat_map(|d| &d.data)
        .filter_map(|p| p.label.clone().map(|label| (p.x, label)))
        .collect();
    ticks.sort_by(|a, b| a.0.total_cmp(&b.0));
    ticks.dedup_by(|a, b| a.0 == b.0);
    ticks
}

/// Label of the labeled position nearest to `x`, within `tolerance`
fn nearest_label(ticks: &[(f64, String)], x: f64, tolerance: f64) -> Option<&str> {
    ticks
        .iter()
        .min_by(|a, b| (a.0 - x).abs().total_cmp(&(b.0 - x).abs()))
        .filter(|(tx, _)| (tx - x).abs() <= tolerance)
        .map(|(_, label)| label.as_str())
}

impl GraphRenderer for LineChartRenderer {
    fn name(&self) -> &'static str {
        "line"
    }

    fn render_svg(&self, config: &GraphConfig, datasets: &[DataSet]) -> Result<String> {
        let has_data = datasets.iter().any(|d| !d.is_empty());
        let (x_range, y_range) = self.calculate_data_ranges(datasets);

        let ticks = tick_labels(datasets);
        #[allow(clippy::cast_precision_loss)]
        let tolerance = match (ticks.first(), ticks.last()) {
            (Some(first), Some(last)) if ticks.len() > 1 => {
                ((last.0 - first.0) / (ticks.len() - 1) as f64).max(0.5)
            }
            _ => 0.5,
        };
        let x_formatter = |x: &f64| {
            nearest_label(&ticks, *x, tolerance)
                .map(str::to_string)
                .unwrap_or_default()
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
                .build_cartesian_2d(x_range, y_range)?;

            let grid_color = style.grid.color.as_deref().map(|c| self.parse_color(c));
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(config.x_label.as_deref().unwrap_or(""))
                .y_desc(config.y_label.as_deref().unwrap_or(""))
                .label_style((style.axis_font.family.as_str(), style.axis_font.size))
                .y_label_formatter(&y_formatter);
            if !ticks.is_empty() {
                mesh.x_labels(ticks.len().min(10)).x_label_formatter(&x_formatter);
            }
            if !style.grid.show_x {
                mesh.disable_x_mesh();
            }
            if !style.grid.show_y {
                mesh.disable_y_mesh();
            }
            if let Some(color) = grid_color {
                mesh.bold_line_style(color.mix(0.3)).light_line_style(color.mix(0.1));
            }
            mesh.draw()?;

            for (i, dataset) in datasets.iter().enumerate() {
                let color = self.series_color(config, dataset, i);
                let points: Vec<(f64, f64)> = dataset.data.iter().map(|p| (p.x, p.y)).collect();
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                    .label(dataset.name.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                    });
            }

            // Draw legend if there are multiple datasets
            if datasets.len() > 1 {
                chart
                    .configure_series_labels()
                    .label_font((style.label_font.family.as_str(), style.label_font.size))
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .draw()?;
            }

            if !has_data {
                draw_no_data(root, config)?;
            }
            Ok(())
        })?;

        debug!(title = %config.title, series = datasets.len(), "Rendered line chart");
        Ok(svg)
    }
}
