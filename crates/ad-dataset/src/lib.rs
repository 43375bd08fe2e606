//! ad-dataset: the read-only dataset store.
//!
//! The table is loaded once at startup from CSV or JSON and then shared as an
//! `Arc<Table>`. Nothing downstream mutates it.

pub mod load;
pub mod raw;

pub use load::{Dataset, DatasetFormat, DatasetInfo, load, read_csv, read_json};

use std::path::PathBuf;

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Unsupported dataset format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Dataset is missing required column: {column}")]
    MissingColumn { column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
