//! One-time dataset loading.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ad_core::{Field, Record, Table};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::raw::RawRecord;
use crate::{DatasetError, DatasetResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    pub fn from_path(path: &Path) -> DatasetResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(DatasetError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Summary of what was loaded.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub source: Option<PathBuf>,
    pub format: DatasetFormat,
    pub row_count: usize,
    pub compartment_counts: BTreeMap<String, usize>,
    pub unrecognized_compartments: usize,
    pub loaded_at: DateTime<Utc>,
}

/// The process-wide, read-only table plus its load summary.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub table: Arc<Table>,
    pub info: DatasetInfo,
}

impl Dataset {
    fn from_records(records: Vec<Record>, format: DatasetFormat, source: Option<PathBuf>) -> Self {
        let mut compartment_counts = BTreeMap::new();
        let mut unrecognized = 0;
        for record in &records {
            if !record.compartment.is_recognized() {
                unrecognized += 1;
            }
            *compartment_counts
                .entry(record.compartment.as_str().to_string())
                .or_insert(0) += 1;
        }
        if unrecognized > 0 {
            warn!(
                rows = unrecognized,
                "dataset contains rows with an unrecognized compartment"
            );
        }

        let info = DatasetInfo {
            source,
            format,
            row_count: records.len(),
            compartment_counts,
            unrecognized_compartments: unrecognized,
            loaded_at: Utc::now(),
        };
        Self {
            table: Arc::new(Table::from_records(records)),
            info,
        }
    }
}

/// Load the dataset, choosing the parser from the file extension.
pub fn load(path: &Path) -> DatasetResult<Dataset> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let format = DatasetFormat::from_path(path)?;
    let file = std::fs::File::open(path)?;
    let records = match format {
        DatasetFormat::Csv => read_csv_records(file)?,
        DatasetFormat::Json => read_json_records(file)?,
    };
    let dataset = Dataset::from_records(records, format, Some(path.to_path_buf()));
    info!(
        path = %path.display(),
        rows = dataset.info.row_count,
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse CSV from any reader; the header row must name every column.
pub fn read_csv<R: Read>(reader: R) -> DatasetResult<Dataset> {
    let records = read_csv_records(reader)?;
    Ok(Dataset::from_records(records, DatasetFormat::Csv, None))
}

/// Parse a JSON array of row objects keyed by column header.
pub fn read_json<R: Read>(reader: R) -> DatasetResult<Dataset> {
    let records = read_json_records(reader)?;
    Ok(Dataset::from_records(records, DatasetFormat::Json, None))
}

fn require_columns(mut present: impl FnMut(&str) -> bool) -> DatasetResult<()> {
    for field in Field::ALL {
        if !present(field.column_name()) {
            return Err(DatasetError::MissingColumn {
                column: field.column_name().to_string(),
            });
        }
    }
    Ok(())
}

fn read_csv_records<R: Read>(reader: R) -> DatasetResult<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    require_columns(|name| headers.iter().any(|h| h == name))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRecord>() {
        records.push(Record::from(row?));
    }
    Ok(records)
}

fn read_json_records<R: Read>(reader: R) -> DatasetResult<Vec<Record>> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_reader(reader)?;

    // JSON has no header row, so every object must carry every column.
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        require_columns(|name| row.contains_key(name))?;
        let raw: RawRecord = serde_json::from_value(serde_json::Value::Object(row))?;
        records.push(Record::from(raw));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ad_core::Compartment;

    const HEADER: &str = "Additive,Additive Abbrev,Reference,Compartment,Polymer Types,Polymers Number,Concentration(ug/g),Common Additives\n";

    #[test]
    fn csv_empty_cells_are_null() {
        let body = format!(
            "{HEADER}Bisphenol A,BPA,Smith 2020,Plastic,PP,1,2.0,x\nDEHP,DEHP,Lee 2019,Sediment,,,,\n"
        );
        let dataset = read_csv(body.as_bytes()).unwrap();
        let rows = dataset.table.records();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].concentration_ug_g, Some(2.0));
        assert_eq!(rows[0].common_additives.as_deref(), Some("x"));
        assert_eq!(rows[1].compartment, Compartment::Sediment);
        assert_eq!(rows[1].polymer_types, None);
        assert_eq!(rows[1].concentration_ug_g, None);
        assert_eq!(rows[1].common_additives, None);
        assert_eq!(dataset.info.compartment_counts.get("Plastic"), Some(&1));
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let body = "Additive,Compartment\nA,Plastic\n";
        let err = read_csv(body.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { ref column } if column == "Additive Abbrev"));
    }

    #[test]
    fn json_rows_with_nulls() {
        let body = r#"[
            {"Additive": "A1", "Additive Abbrev": "A1", "Reference": "R1", "Compartment": "Plastic",
             "Polymer Types": "PP", "Polymers Number": 1, "Concentration(ug/g)": 2.0, "Common Additives": "x"},
            {"Additive": "A2", "Additive Abbrev": "A2", "Reference": "R2", "Compartment": "Air",
             "Polymer Types": null, "Polymers Number": null, "Concentration(ug/g)": null, "Common Additives": null}
        ]"#;
        let dataset = read_json(body.as_bytes()).unwrap();
        assert_eq!(dataset.info.row_count, 2);
        assert_eq!(dataset.info.unrecognized_compartments, 1);
        assert_eq!(dataset.table.records()[1].polymers_number, None);
    }

    #[test]
    fn json_row_missing_a_column_is_fatal() {
        let body = r#"[
            {"Additive": "A1", "Additive Abbrev": "A1", "Reference": "R1", "Compartment": "Plastic",
             "Polymer Types": "PP", "Polymers Number": 1, "Concentration(ug/g)": 2.0, "Common Additives": "x"},
            {"Additive": "A2"}
        ]"#;
        let err = read_json(body.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { ref column } if column == "Additive Abbrev"));
    }

    #[test]
    fn json_empty_array_loads_no_rows() {
        let dataset = read_json("[]".as_bytes()).unwrap();
        assert_eq!(dataset.info.row_count, 0);
        assert!(dataset.table.is_empty());
    }

    #[test]
    fn unsupported_extension() {
        assert!(matches!(
            DatasetFormat::from_path(Path::new("data.xlsx")),
            Err(DatasetError::UnsupportedFormat { .. })
        ));
        assert_eq!(
            DatasetFormat::from_path(Path::new("DATA.CSV")).unwrap(),
            DatasetFormat::Csv
        );
    }
}
