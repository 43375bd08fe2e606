//! Bar-chart requests for the concentration cards.
//!
//! The renderer is not part of this crate. [`build_chart_spec`] turns an
//! aggregated table into a [`ChartSpec`]: bars, colors, hover text and axis
//! settings, ready for `egui_plot` or for export as JSON.

pub mod builder;
pub mod palette;
pub mod spec;

pub use builder::{X_TICK_ANGLE_DEG, Y_RANGE_FACTOR, build_chart_spec};
pub use palette::{PASTEL_PALETTE, palette_color, parse_hex};
pub use spec::{BarSpec, ChartSpec, HoverEntry, LegendEntry, XAxisSpec, YAxisSpec};

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// The column is not present in the aggregated table.
    #[error("Missing field: {field}")]
    MissingField { field: String },

    /// Bar heights need a numeric column.
    #[error("Field is not numeric: {field}")]
    NonNumericField { field: String },
}
