//! Shared dashboard service layer.
//!
//! This crate gives the CLI and the desktop UI one interface to the pipeline:
//! configuration, dataset loading, the reactive session that turns filter
//! controls into metrics and charts, and file exports.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod value;

// Re-export key types for convenience
pub use config::{DashboardConfig, load_config, save_config};
pub use dashboard::{
    COMPARTMENT_CHART_TITLE, Dashboard, DashboardView, PLASTIC_CHART_TITLE, load_dataset, node,
};
pub use error::{AppError, AppResult};
pub use export::{aggregate_to_csv, chart_to_json, export_aggregate_csv, export_chart_json};
pub use value::DashboardValue;
