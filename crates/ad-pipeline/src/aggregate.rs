//! Per-additive summary rows for the concentration charts.

use std::collections::BTreeMap;

use ad_core::{CellValue, Compartment, CoreError, CoreResult, Field, Table};

/// Which side of the Plastic baseline a chart summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompartmentScope {
    Plastic,
    NonPlastic,
}

impl CompartmentScope {
    pub fn contains(self, compartment: &Compartment) -> bool {
        match self {
            Self::Plastic => compartment.is_plastic(),
            Self::NonPlastic => !compartment.is_plastic(),
        }
    }
}

/// One row per `Additive Abbrev`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub additive_abbrev: String,
    /// Median of the non-null concentrations; `None` when every value was null.
    pub median_concentration: Option<f64>,
    /// Lexicographically largest polymer-types string, used as a label.
    pub polymer_types: String,
    pub polymers_number: Option<f64>,
}

impl AggregateRow {
    pub fn get(&self, field: Field) -> CoreResult<CellValue<'_>> {
        let cell = match field {
            Field::AdditiveAbbrev => CellValue::Text(&self.additive_abbrev),
            Field::Concentration => match self.median_concentration {
                Some(v) => CellValue::Number(v),
                None => CellValue::Null,
            },
            Field::PolymerTypes => CellValue::Text(&self.polymer_types),
            Field::PolymersNumber => match self.polymers_number {
                Some(v) => CellValue::Number(v),
                None => CellValue::Null,
            },
            other => {
                return Err(CoreError::MissingField {
                    field: other.column_name().to_string(),
                });
            }
        };
        Ok(cell)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable {
    pub scope: CompartmentScope,
    rows: Vec<AggregateRow>,
}

impl AggregateTable {
    /// Output columns, in order.
    pub const FIELDS: [Field; 4] = [
        Field::AdditiveAbbrev,
        Field::Concentration,
        Field::PolymerTypes,
        Field::PolymersNumber,
    ];

    pub fn from_rows(scope: CompartmentScope, rows: Vec<AggregateRow>) -> Self {
        Self { scope, rows }
    }

    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_field(&self, field: Field) -> bool {
        Self::FIELDS.contains(&field)
    }

    /// Look up `field` in the column set, reporting schema drift.
    pub fn field(&self, name: &str) -> CoreResult<Field> {
        let field = Field::lookup(name)?;
        if self.has_field(field) {
            Ok(field)
        } else {
            Err(CoreError::MissingField {
                field: name.to_string(),
            })
        }
    }
}

#[derive(Default)]
struct GroupAcc<'a> {
    concentrations: Vec<f64>,
    polymer_types: &'a str,
    polymers_number: Option<f64>,
}

/// Median of `values`, reordering them in place. `None` when empty.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Summarize chart-eligible rows in `scope`, grouped by `Additive Abbrev`.
///
/// Groups come out in key order, so the result does not depend on the order
/// of `table`.
pub fn aggregate(table: &Table, scope: CompartmentScope) -> AggregateTable {
    let mut groups: BTreeMap<&str, GroupAcc<'_>> = BTreeMap::new();

    for record in table.iter() {
        if !scope.contains(&record.compartment) || record.common_additives.is_none() {
            continue;
        }
        let Some(key) = record.additive_abbrev.as_deref() else {
            continue;
        };

        let acc = groups.entry(key).or_default();
        if let Some(c) = record.concentration_ug_g.filter(|v| !v.is_nan()) {
            acc.concentrations.push(c);
        }
        let polymer_types = record.polymer_types_or_empty();
        if polymer_types > acc.polymer_types {
            acc.polymer_types = polymer_types;
        }
        if let Some(n) = record.polymers_number.filter(|v| !v.is_nan()) {
            acc.polymers_number = Some(acc.polymers_number.map_or(n, |m| m.max(n)));
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, mut acc)| AggregateRow {
            additive_abbrev: key.to_string(),
            median_concentration: median(&mut acc.concentrations),
            polymer_types: acc.polymer_types.to_string(),
            polymers_number: acc.polymers_number,
        })
        .collect();

    AggregateTable { scope, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ad_core::Record;

    fn row(abbrev: &str, compartment: Compartment, conc: Option<f64>) -> Record {
        let mut r = Record::new(abbrev, abbrev, "R", compartment).with_common_additives("x");
        r.concentration_ug_g = conc;
        r
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn groups_sorted_by_key() {
        let table = Table::from_records(vec![
            row("Z", Compartment::Plastic, Some(1.0)),
            row("B", Compartment::Plastic, Some(5.0)),
            row("B", Compartment::Plastic, Some(7.0)),
            row("M", Compartment::Plastic, Some(2.0)),
        ]);
        let out = aggregate(&table, CompartmentScope::Plastic);
        let keys: Vec<_> = out.rows().iter().map(|r| r.additive_abbrev.as_str()).collect();
        assert_eq!(keys, vec!["B", "M", "Z"]);
        assert_eq!(out.rows()[0].median_concentration, Some(6.0));
    }

    #[test]
    fn scope_and_marker_restrict_rows() {
        let mut unmarked = row("U", Compartment::Plastic, Some(1.0));
        unmarked.common_additives = None;
        let table = Table::from_records(vec![
            row("P", Compartment::Plastic, Some(1.0)),
            row("S", Compartment::Sediment, Some(2.0)),
            row("B", Compartment::Biota, Some(3.0)),
            unmarked,
        ]);
        let plastic = aggregate(&table, CompartmentScope::Plastic);
        assert_eq!(plastic.len(), 1);
        let other = aggregate(&table, CompartmentScope::NonPlastic);
        let keys: Vec<_> = other.rows().iter().map(|r| r.additive_abbrev.clone()).collect();
        assert_eq!(keys, vec!["B", "S"]);
    }

    #[test]
    fn all_null_concentrations_give_no_median() {
        let table = Table::from_records(vec![
            row("N", Compartment::Plastic, None),
            row("N", Compartment::Plastic, None),
        ]);
        let out = aggregate(&table, CompartmentScope::Plastic);
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0].median_concentration, None);
        assert!(out.rows()[0].get(Field::Concentration).unwrap().is_null());
    }

    #[test]
    fn label_and_count_take_maximum() {
        let table = Table::from_records(vec![
            row("A", Compartment::Plastic, Some(1.0))
                .with_polymer_types("PE")
                .with_polymers_number(1.0),
            row("A", Compartment::Plastic, Some(1.0))
                .with_polymer_types("PP, PVC")
                .with_polymers_number(2.0),
            row("A", Compartment::Plastic, Some(1.0)),
        ]);
        let out = aggregate(&table, CompartmentScope::Plastic);
        assert_eq!(out.rows()[0].polymer_types, "PP, PVC");
        assert_eq!(out.rows()[0].polymers_number, Some(2.0));
    }

    #[test]
    fn null_keys_are_dropped() {
        let mut keyless = row("K", Compartment::Plastic, Some(1.0));
        keyless.additive_abbrev = None;
        let out = aggregate(&Table::from_records(vec![keyless]), CompartmentScope::Plastic);
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_columns_are_missing_fields() {
        let out = aggregate(&Table::default(), CompartmentScope::Plastic);
        assert!(out.field("Polymers Number").is_ok());
        assert!(matches!(
            out.field("Reference"),
            Err(CoreError::MissingField { .. })
        ));
        assert!(matches!(
            out.field("Concentration"),
            Err(CoreError::MissingField { .. })
        ));
    }
}
