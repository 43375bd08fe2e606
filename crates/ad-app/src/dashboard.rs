//! Reactive dashboard session.
//!
//! Filter controls are inputs of a [`ReactiveGraph`]; the filtered table,
//! metrics, summaries and chart requests are derived nodes. A control change
//! only recomputes what depends on it.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use ad_chart::{ChartSpec, build_chart_spec};
use ad_core::{CompartmentChoice, Field, PolymerType, Table};
use ad_dataset::Dataset;
use ad_pipeline::{
    AggregateTable, CompartmentScope, DashboardMetrics, FilterParams, PolymerMatching, aggregate,
    count_distinct, filter_with,
};
use ad_reactive::{ReactiveError, ReactiveGraph, ReactiveResult};
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::value::DashboardValue;

pub const PLASTIC_CHART_TITLE: &str = "Additives concentration in Plastic";
pub const COMPARTMENT_CHART_TITLE: &str = "Additives concentration in selected compartment";

/// Node names of the dashboard graph.
pub mod node {
    pub const DATASET: &str = "dataset";
    pub const COMPARTMENT: &str = "compartment";
    pub const POLYMERS: &str = "polymers";
    pub const MATCHING: &str = "polymer_matching";
    pub const FILTERED: &str = "filtered";
    pub const ADDITIVE_COUNT: &str = "additive_count";
    pub const REFERENCE_COUNT: &str = "reference_count";
    pub const PLASTIC_SUMMARY: &str = "plastic_summary";
    pub const COMPARTMENT_SUMMARY: &str = "compartment_summary";
    pub const PLASTIC_CHART: &str = "plastic_chart";
    pub const COMPARTMENT_CHART: &str = "compartment_chart";
}

/// Load the dataset once for the session.
pub fn load_dataset(path: &Path) -> AppResult<Dataset> {
    Ok(ad_dataset::load(path)?)
}

/// Everything a front end draws for the current controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub compartment: CompartmentChoice,
    pub metrics: DashboardMetrics,
    pub plastic_chart: Arc<ChartSpec>,
    pub compartment_chart: Arc<ChartSpec>,
}

fn chart_node(
    graph: &mut ReactiveGraph<DashboardValue>,
    id: &'static str,
    summary: &'static str,
    title: &'static str,
) -> ReactiveResult<()> {
    graph.add_derived(id, &[summary], move |v| {
        let table = v[0].as_aggregate(summary)?;
        let spec = build_chart_spec(
            table,
            Field::AdditiveAbbrev.column_name(),
            Field::Concentration.column_name(),
            Some(Field::PolymersNumber.column_name()),
        )
        .map_err(|e| ReactiveError::Compute {
            node: id.to_string(),
            what: e.to_string(),
        })?;
        Ok(DashboardValue::Chart(Arc::new(spec.with_title(title))))
    })?;
    Ok(())
}

fn build_graph(
    dataset: Arc<Table>,
    config: &DashboardConfig,
) -> ReactiveResult<ReactiveGraph<DashboardValue>> {
    let params = config.filter_params();
    let mut graph = ReactiveGraph::new();

    graph.add_input(node::DATASET, DashboardValue::Table(dataset))?;
    graph.add_input(
        node::COMPARTMENT,
        DashboardValue::Compartment(params.compartment),
    )?;
    graph.add_input(node::POLYMERS, DashboardValue::Polymers(params.polymers))?;
    graph.add_input(node::MATCHING, DashboardValue::Matching(params.matching))?;

    graph.add_derived(
        node::FILTERED,
        &[node::DATASET, node::COMPARTMENT, node::POLYMERS, node::MATCHING],
        |v| {
            let table = v[0].as_table(node::DATASET)?;
            let params = FilterParams {
                compartment: v[1].as_compartment(node::COMPARTMENT)?,
                polymers: v[2].as_polymers(node::POLYMERS)?.clone(),
                matching: v[3].as_matching(node::MATCHING)?,
            };
            let filtered = filter_with(table, &params);
            debug!(
                rows = filtered.len(),
                compartment = %params.compartment,
                "filtered dataset"
            );
            Ok(DashboardValue::Table(Arc::new(filtered)))
        },
    )?;

    graph.add_derived(node::ADDITIVE_COUNT, &[node::FILTERED], |v| {
        let table = v[0].as_table(node::FILTERED)?;
        Ok(DashboardValue::Count(count_distinct(table, Field::Additive)))
    })?;
    graph.add_derived(node::REFERENCE_COUNT, &[node::FILTERED], |v| {
        let table = v[0].as_table(node::FILTERED)?;
        Ok(DashboardValue::Count(count_distinct(table, Field::Reference)))
    })?;

    graph.add_derived(node::PLASTIC_SUMMARY, &[node::FILTERED], |v| {
        let table = v[0].as_table(node::FILTERED)?;
        let summary = aggregate(table, CompartmentScope::Plastic);
        Ok(DashboardValue::Aggregate(Arc::new(summary)))
    })?;
    graph.add_derived(node::COMPARTMENT_SUMMARY, &[node::FILTERED], |v| {
        let table = v[0].as_table(node::FILTERED)?;
        let summary = aggregate(table, CompartmentScope::NonPlastic);
        Ok(DashboardValue::Aggregate(Arc::new(summary)))
    })?;

    chart_node(
        &mut graph,
        node::PLASTIC_CHART,
        node::PLASTIC_SUMMARY,
        PLASTIC_CHART_TITLE,
    )?;
    chart_node(
        &mut graph,
        node::COMPARTMENT_CHART,
        node::COMPARTMENT_SUMMARY,
        COMPARTMENT_CHART_TITLE,
    )?;

    graph.validate()?;
    Ok(graph)
}

/// One interactive session over a shared, read-only dataset.
pub struct Dashboard {
    graph: ReactiveGraph<DashboardValue>,
    title: String,
}

impl Dashboard {
    pub fn new(dataset: Arc<Table>, config: &DashboardConfig) -> AppResult<Self> {
        info!(rows = dataset.len(), "starting dashboard session");
        let graph = build_graph(dataset, config)?;
        Ok(Self {
            graph,
            title: config.title.clone(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn input(&self, id: &str) -> AppResult<&DashboardValue> {
        self.graph.peek(id).ok_or_else(|| {
            ReactiveError::UnknownNode {
                node: id.to_string(),
            }
            .into()
        })
    }

    pub fn compartment(&self) -> AppResult<CompartmentChoice> {
        Ok(self.input(node::COMPARTMENT)?.as_compartment(node::COMPARTMENT)?)
    }

    pub fn polymers(&self) -> AppResult<BTreeSet<PolymerType>> {
        Ok(self.input(node::POLYMERS)?.as_polymers(node::POLYMERS)?.clone())
    }

    pub fn matching(&self) -> AppResult<PolymerMatching> {
        Ok(self.input(node::MATCHING)?.as_matching(node::MATCHING)?)
    }

    /// Returns whether the selection changed.
    pub fn set_compartment(&mut self, compartment: CompartmentChoice) -> AppResult<bool> {
        debug!(%compartment, "compartment selected");
        Ok(self
            .graph
            .set_input(node::COMPARTMENT, DashboardValue::Compartment(compartment))?)
    }

    pub fn set_polymers(&mut self, polymers: BTreeSet<PolymerType>) -> AppResult<bool> {
        debug!(count = polymers.len(), "polymer selection changed");
        Ok(self
            .graph
            .set_input(node::POLYMERS, DashboardValue::Polymers(polymers))?)
    }

    pub fn toggle_polymer(&mut self, polymer: PolymerType) -> AppResult<bool> {
        let mut polymers = self.polymers()?;
        if !polymers.remove(&polymer) {
            polymers.insert(polymer);
        }
        self.set_polymers(polymers)
    }

    pub fn select_all_polymers(&mut self) -> AppResult<bool> {
        self.set_polymers(PolymerType::ALL.into_iter().collect())
    }

    pub fn clear_polymers(&mut self) -> AppResult<bool> {
        self.set_polymers(BTreeSet::new())
    }

    pub fn set_matching(&mut self, matching: PolymerMatching) -> AppResult<bool> {
        Ok(self
            .graph
            .set_input(node::MATCHING, DashboardValue::Matching(matching))?)
    }

    pub fn filtered(&mut self) -> AppResult<Arc<Table>> {
        Ok(self
            .graph
            .get(node::FILTERED)?
            .as_table(node::FILTERED)?
            .clone())
    }

    pub fn metrics(&mut self) -> AppResult<DashboardMetrics> {
        let additive_count = self
            .graph
            .get(node::ADDITIVE_COUNT)?
            .as_count(node::ADDITIVE_COUNT)?;
        let reference_count = self
            .graph
            .get(node::REFERENCE_COUNT)?
            .as_count(node::REFERENCE_COUNT)?;
        Ok(DashboardMetrics {
            additive_count,
            reference_count,
        })
    }

    pub fn summary(&mut self, scope: CompartmentScope) -> AppResult<Arc<AggregateTable>> {
        let id = match scope {
            CompartmentScope::Plastic => node::PLASTIC_SUMMARY,
            CompartmentScope::NonPlastic => node::COMPARTMENT_SUMMARY,
        };
        Ok(self.graph.get(id)?.as_aggregate(id)?.clone())
    }

    pub fn chart(&mut self, scope: CompartmentScope) -> AppResult<Arc<ChartSpec>> {
        let id = match scope {
            CompartmentScope::Plastic => node::PLASTIC_CHART,
            CompartmentScope::NonPlastic => node::COMPARTMENT_CHART,
        };
        Ok(self.graph.get(id)?.as_chart(id)?.clone())
    }

    pub fn view(&mut self) -> AppResult<DashboardView> {
        Ok(DashboardView {
            compartment: self.compartment()?,
            metrics: self.metrics()?,
            plastic_chart: self.chart(CompartmentScope::Plastic)?,
            compartment_chart: self.chart(CompartmentScope::NonPlastic)?,
        })
    }

    /// Recompute every stale output; returns the names of outputs that changed.
    pub fn refresh(&mut self) -> AppResult<Vec<String>> {
        let changed = self.graph.propagate()?;
        Ok(changed.into_iter().map(|id| id.0).collect())
    }

    /// Change counter of a graph node, for skipping redraws.
    pub fn revision(&self, id: &str) -> AppResult<u64> {
        Ok(self.graph.revision(id)?)
    }
}
