//! Error types for the ad-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the pipeline crates and
/// provides one error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Dashboard graph error: {0}")]
    Graph(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ad-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<ad_dataset::DatasetError> for AppError {
    fn from(err: ad_dataset::DatasetError) -> Self {
        AppError::Dataset(err.to_string())
    }
}

impl From<ad_core::CoreError> for AppError {
    fn from(err: ad_core::CoreError) -> Self {
        match err {
            ad_core::CoreError::MissingField { .. } => AppError::Schema(err.to_string()),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ad_chart::ChartError> for AppError {
    fn from(err: ad_chart::ChartError) -> Self {
        AppError::Chart(err.to_string())
    }
}

impl From<ad_reactive::ReactiveError> for AppError {
    fn from(err: ad_reactive::ReactiveError) -> Self {
        AppError::Graph(err.to_string())
    }
}
