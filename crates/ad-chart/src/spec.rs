//! Renderer-independent description of a categorical bar chart.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub x: String,
    /// Bar height; `None` draws nothing for this category.
    pub y: Option<f64>,
    pub category: Option<String>,
    pub color: String,
    pub hover: Vec<HoverEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisSpec {
    pub title: String,
    pub show_tick_labels: bool,
    pub tick_angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxisSpec {
    pub title: String,
    /// Fixed `[min, max]`; `None` when there is nothing to draw.
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_field: String,
    pub y_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    pub bars: Vec<BarSpec>,
    pub legend: Vec<LegendEntry>,
    pub x_axis: XAxisSpec,
    pub y_axis: YAxisSpec,
}

impl ChartSpec {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// True when no bar has a height.
    pub fn is_empty(&self) -> bool {
        self.bars.iter().all(|b| b.y.is_none())
    }
}
