//! Compartment and polymer-type filtering of the raw table.

use std::collections::BTreeSet;

use ad_core::{CompartmentChoice, PolymerType, Record, Table};
use serde::{Deserialize, Serialize};

/// How a selected polymer abbreviation is compared to a row's `Polymer Types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolymerMatching {
    /// Case-insensitive substring search. "PE" also matches "PET".
    #[default]
    Substring,
    /// Case-insensitive match against delimited tokens only.
    Token,
}

const TOKEN_DELIMITERS: &[char] = &[',', ';', '/', '|', '+'];

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || TOKEN_DELIMITERS.contains(&c)
}

/// Precompiled "any of these polymers" predicate.
///
/// An empty selection matches everything, including an empty polymer string,
/// so selecting nothing behaves exactly like selecting every polymer.
#[derive(Debug, Clone)]
pub struct PolymerMatcher {
    needles: Vec<String>,
    matching: PolymerMatching,
}

impl PolymerMatcher {
    pub fn new<'a>(
        polymers: impl IntoIterator<Item = &'a PolymerType>,
        matching: PolymerMatching,
    ) -> Self {
        let needles = polymers
            .into_iter()
            .map(|p| p.abbrev().to_lowercase())
            .collect();
        Self { needles, matching }
    }

    pub fn is_match(&self, polymer_types: &str) -> bool {
        if self.needles.is_empty() {
            return true;
        }
        let haystack = polymer_types.to_lowercase();
        match self.matching {
            PolymerMatching::Substring => self.needles.iter().any(|n| haystack.contains(n)),
            PolymerMatching::Token => haystack
                .split(is_delimiter)
                .filter(|token| !token.is_empty())
                .any(|token| self.needles.iter().any(|n| n == token)),
        }
    }
}

/// Current state of the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub compartment: CompartmentChoice,
    pub polymers: BTreeSet<PolymerType>,
    pub matching: PolymerMatching,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            compartment: CompartmentChoice::default(),
            polymers: PolymerType::ALL.into_iter().collect(),
            matching: PolymerMatching::default(),
        }
    }
}

/// Keep the Plastic baseline plus the selected compartment, then keep rows
/// whose polymer types mention any selected polymer.
///
/// Returned rows carry `Some("")` where `Polymer Types` was null.
pub fn filter(
    table: &Table,
    compartment: CompartmentChoice,
    polymers: &BTreeSet<PolymerType>,
    matching: PolymerMatching,
) -> Table {
    let matcher = PolymerMatcher::new(polymers, matching);
    table
        .iter()
        .filter(|r| r.compartment.is_plastic() || compartment.matches(&r.compartment))
        .filter(|r| matcher.is_match(r.polymer_types_or_empty()))
        .map(normalize_polymer_types)
        .collect()
}

pub fn filter_with(table: &Table, params: &FilterParams) -> Table {
    filter(table, params.compartment, &params.polymers, params.matching)
}

fn normalize_polymer_types(record: &Record) -> Record {
    let mut row = record.clone();
    if row.polymer_types.is_none() {
        row.polymer_types = Some(String::new());
    }
    row
}
