//! Values carried by the dashboard's reactive graph.

use std::collections::BTreeSet;
use std::sync::Arc;

use ad_chart::ChartSpec;
use ad_core::{CompartmentChoice, PolymerType, Table};
use ad_pipeline::{AggregateTable, PolymerMatching};
use ad_reactive::{ReactiveError, ReactiveResult};

/// Every node of the dashboard graph holds one of these.
///
/// Tables and charts sit behind `Arc` so handing them to a renderer does not
/// copy rows.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardValue {
    Compartment(CompartmentChoice),
    Polymers(BTreeSet<PolymerType>),
    Matching(PolymerMatching),
    Table(Arc<Table>),
    Count(usize),
    Aggregate(Arc<AggregateTable>),
    Chart(Arc<ChartSpec>),
}

fn mismatch(node: &str, expected: &'static str) -> ReactiveError {
    ReactiveError::TypeMismatch {
        node: node.to_string(),
        expected,
    }
}

impl DashboardValue {
    pub fn as_compartment(&self, node: &str) -> ReactiveResult<CompartmentChoice> {
        match self {
            Self::Compartment(c) => Ok(*c),
            _ => Err(mismatch(node, "compartment")),
        }
    }

    pub fn as_polymers(&self, node: &str) -> ReactiveResult<&BTreeSet<PolymerType>> {
        match self {
            Self::Polymers(p) => Ok(p),
            _ => Err(mismatch(node, "polymer selection")),
        }
    }

    pub fn as_matching(&self, node: &str) -> ReactiveResult<PolymerMatching> {
        match self {
            Self::Matching(m) => Ok(*m),
            _ => Err(mismatch(node, "polymer matching mode")),
        }
    }

    pub fn as_table(&self, node: &str) -> ReactiveResult<&Arc<Table>> {
        match self {
            Self::Table(t) => Ok(t),
            _ => Err(mismatch(node, "table")),
        }
    }

    pub fn as_count(&self, node: &str) -> ReactiveResult<usize> {
        match self {
            Self::Count(n) => Ok(*n),
            _ => Err(mismatch(node, "count")),
        }
    }

    pub fn as_aggregate(&self, node: &str) -> ReactiveResult<&Arc<AggregateTable>> {
        match self {
            Self::Aggregate(a) => Ok(a),
            _ => Err(mismatch(node, "aggregate table")),
        }
    }

    pub fn as_chart(&self, node: &str) -> ReactiveResult<&Arc<ChartSpec>> {
        match self {
            Self::Chart(c) => Ok(c),
            _ => Err(mismatch(node, "chart")),
        }
    }
}
