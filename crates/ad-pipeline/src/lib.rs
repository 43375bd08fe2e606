//! ad-pipeline: pure transforms from the dataset to dashboard values.
//!
//! - filter: compartment + polymer selection over the raw table
//! - aggregate: per-additive summary rows for the concentration charts
//! - metrics: distinct counts shown in the value boxes
//!
//! Every function takes its input by reference and returns a freshly built
//! value, so the shared dataset is never touched.

pub mod aggregate;
pub mod filter;
pub mod metrics;

pub use aggregate::{AggregateRow, AggregateTable, CompartmentScope, aggregate, median};
pub use filter::{FilterParams, PolymerMatcher, PolymerMatching, filter, filter_with};
pub use metrics::{DashboardMetrics, count_distinct};
