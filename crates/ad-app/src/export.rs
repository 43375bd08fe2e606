//! Writing chart requests and summaries to disk.

use std::path::Path;

use ad_chart::ChartSpec;
use ad_pipeline::AggregateTable;

use crate::error::{AppError, AppResult};

pub fn chart_to_json(spec: &ChartSpec) -> AppResult<String> {
    serde_json::to_string_pretty(spec).map_err(|e| AppError::Export(e.to_string()))
}

pub fn export_chart_json(spec: &ChartSpec, path: &Path) -> AppResult<()> {
    let json = chart_to_json(spec)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// CSV with the summary's columns as headers; null cells are left empty.
pub fn aggregate_to_csv(table: &AggregateTable) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| AppError::Export(e.to_string());

    writer
        .write_record(AggregateTable::FIELDS.iter().map(|f| f.column_name()))
        .map_err(csv_err)?;

    for row in table.rows() {
        let mut cells = Vec::with_capacity(AggregateTable::FIELDS.len());
        for field in AggregateTable::FIELDS {
            let cell = row.get(field)?;
            cells.push(match cell.as_number() {
                Some(v) => v.to_string(),
                None => cell.to_label().unwrap_or_default(),
            });
        }
        writer.write_record(&cells).map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

pub fn export_aggregate_csv(table: &AggregateTable, path: &Path) -> AppResult<()> {
    let content = aggregate_to_csv(table)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ad_pipeline::{AggregateRow, CompartmentScope};

    #[test]
    fn csv_has_header_and_blank_nulls() {
        let table = AggregateTable::from_rows(
            CompartmentScope::Plastic,
            vec![
                AggregateRow {
                    additive_abbrev: "BPA".to_string(),
                    median_concentration: Some(2.5),
                    polymer_types: "PP, PE".to_string(),
                    polymers_number: Some(2.0),
                },
                AggregateRow {
                    additive_abbrev: "NP".to_string(),
                    median_concentration: None,
                    polymer_types: String::new(),
                    polymers_number: None,
                },
            ],
        );
        let csv = aggregate_to_csv(&table).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Additive Abbrev,Concentration(ug/g),Polymer Types,Polymers Number"
        );
        assert_eq!(lines[1], "BPA,2.5,\"PP, PE\",2");
        assert_eq!(lines[2], "NP,,,");
    }
}
