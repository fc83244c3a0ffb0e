//! Chart model shared by every renderer

use bikeshare_config::ChartsConfig;
use serde::{Deserialize, Serialize};

use crate::aggregator::{CategoryTotal, SeriesPoint, UserSplit};
use crate::bucketizer::Bucket;

/// Supported chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphType {
    Line,
    Bar,
    Pie,
}

/// Chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub graph_type: GraphType,
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            graph_type: GraphType::Line,
            title: "Graph".to_string(),
            width: 960,
            height: 480,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl GraphConfig {
    pub fn new(graph_type: GraphType, title: impl Into<String>) -> Self {
        Self {
            graph_type,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Size and style taken from the dashboard chart settings
    pub fn themed(graph_type: GraphType, title: impl Into<String>, charts: &ChartsConfig) -> Self {
        Self {
            width: charts.width,
            height: charts.height,
            style: StyleConfig::from_charts(charts),
            ..Self::new(graph_type, title)
        }
    }

    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = Some(x.into());
        self.y_label = Some(y.into());
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.style.color_scheme = scheme;
        self
    }
}

/// Data point for charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    /// Category or tick label shown instead of the numeric `x`
    pub label: Option<String>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }

    pub fn labeled(x: f64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: Some(label.into()),
        }
    }
}

/// Chart data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub name: String,
    pub data: Vec<DataPoint>,
    /// Overrides the color scheme for this series
    pub color: Option<String>,
}

#[allow(clippy::cast_precision_loss)]
impl DataSet {
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            data,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// One labeled point per category, indexed from zero
    pub fn from_totals(name: impl Into<String>, totals: &[CategoryTotal]) -> Self {
        let data = totals
            .iter()
            .enumerate()
            .map(|(i, t)| DataPoint::labeled(i as f64, t.total as f64, t.label.clone()))
            .collect();
        Self::new(name, data)
    }

    /// One labeled point per bucket, indexed from zero
    pub fn from_buckets(name: impl Into<String>, buckets: &[Bucket]) -> Self {
        let data = buckets
            .iter()
            .enumerate()
            .map(|(i, b)| DataPoint::labeled(i as f64, b.count as f64, b.label.clone()))
            .collect();
        Self::new(name, data)
    }

    pub fn from_series(name: impl Into<String>, points: &[SeriesPoint]) -> Self {
        let data = points
            .iter()
            .map(|p| DataPoint::labeled(p.x, p.value, p.label.clone()))
            .collect();
        Self::new(name, data)
    }

    /// Casual and registered series, in that order
    pub fn from_splits(splits: &[UserSplit]) -> [Self; 2] {
        let series = |pick: fn(&UserSplit) -> u64| -> Vec<DataPoint> {
            splits
                .iter()
                .enumerate()
                .map(|(i, s)| DataPoint::labeled(i as f64, pick(s) as f64, s.label.clone()))
                .collect()
        };
        [
            Self::new("Casual", series(|s| s.casual)),
            Self::new("Registered", series(|s| s.registered)),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of every `y`
    pub fn total(&self) -> f64 {
        self.data.iter().map(|p| p.y).sum()
    }
}

/// Color scheme for charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Categorical ten-color palette
    Default,
    /// Sequential light-to-dark blues
    Blues,
    /// Sequential green-to-blue ramp
    GnBu,
    Custom(Vec<String>),
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 50,
            left: 70,
        }
    }
}

/// Grid line configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub show_x: bool,
    pub show_y: bool,
    pub color: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_x: true,
            show_y: true,
            color: None,
        }
    }
}

/// Comprehensive styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
    pub grid: GridConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 20,
            },
            axis_font: FontConfig::default(),
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
        }
    }
}

impl StyleConfig {
    /// Style derived from the dashboard chart settings; categories use the
    /// configured palette
    pub fn from_charts(charts: &ChartsConfig) -> Self {
        Self {
            color_scheme: ColorScheme::Custom(charts.colors.categories.clone()),
            background_color: Some(charts.colors.background.clone()),
            grid: GridConfig {
                show_x: charts.enable_grid,
                show_y: charts.enable_grid,
                color: None,
            },
            ..Self::default()
        }
    }
}
