//! Distinct-count summaries for the value boxes.

use std::collections::HashSet;

use ad_core::{CellValue, Field, Table};

#[derive(PartialEq, Eq, Hash)]
enum DistinctKey<'a> {
    Text(&'a str),
    Number(u64),
}

/// Number of distinct non-null values of `field` in `table`.
pub fn count_distinct(table: &Table, field: Field) -> usize {
    let mut seen = HashSet::new();
    for record in table.iter() {
        let key = match record.get(field) {
            CellValue::Text(text) => DistinctKey::Text(text),
            // -0.0 and 0.0 count once
            CellValue::Number(v) => DistinctKey::Number((v + 0.0).to_bits()),
            CellValue::Null => continue,
        };
        seen.insert(key);
    }
    seen.len()
}

/// The two numbers shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardMetrics {
    pub additive_count: usize,
    pub reference_count: usize,
}

impl DashboardMetrics {
    pub fn from_table(table: &Table) -> Self {
        Self {
            additive_count: count_distinct(table, Field::Additive),
            reference_count: count_distinct(table, Field::Reference),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ad_core::{Compartment, Record};

    #[test]
    fn empty_table_counts_zero() {
        let table = Table::default();
        assert_eq!(count_distinct(&table, Field::Additive), 0);
        assert_eq!(DashboardMetrics::from_table(&table), DashboardMetrics::default());
    }

    #[test]
    fn duplicates_and_nulls() {
        let mut anonymous = Record::new("x", "x", "R9", Compartment::Biota);
        anonymous.additive = None;
        let table = Table::from_records(vec![
            Record::new("BPA", "BPA", "R1", Compartment::Plastic),
            Record::new("BPA", "BPA", "R2", Compartment::Sediment),
            Record::new("DEHP", "DEHP", "R1", Compartment::Plastic),
            anonymous,
        ]);
        let metrics = DashboardMetrics::from_table(&table);
        assert_eq!(metrics.additive_count, 2);
        assert_eq!(metrics.reference_count, 3);
    }

    #[test]
    fn numeric_columns_count_by_value() {
        let table = Table::from_records(vec![
            Record::new("A", "A", "R", Compartment::Plastic).with_polymers_number(1.0),
            Record::new("B", "B", "R", Compartment::Plastic).with_polymers_number(1.0),
            Record::new("C", "C", "R", Compartment::Plastic).with_polymers_number(3.0),
            Record::new("D", "D", "R", Compartment::Plastic),
        ]);
        assert_eq!(count_distinct(&table, Field::PolymersNumber), 2);
    }
}
