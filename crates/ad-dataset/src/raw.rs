//! Source-row shape with the dataset's own column headers.

use ad_core::{Compartment, Record};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Additive", default)]
    pub additive: Option<String>,
    #[serde(rename = "Additive Abbrev", default)]
    pub additive_abbrev: Option<String>,
    #[serde(rename = "Reference", default)]
    pub reference: Option<String>,
    #[serde(rename = "Compartment", default)]
    pub compartment: Option<String>,
    #[serde(rename = "Polymer Types", default)]
    pub polymer_types: Option<String>,
    #[serde(rename = "Polymers Number", default)]
    pub polymers_number: Option<f64>,
    #[serde(rename = "Concentration(ug/g)", default)]
    pub concentration_ug_g: Option<f64>,
    #[serde(rename = "Common Additives", default)]
    pub common_additives: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record {
            additive: non_empty(raw.additive),
            additive_abbrev: non_empty(raw.additive_abbrev),
            reference: non_empty(raw.reference),
            compartment: Compartment::parse(raw.compartment.as_deref().unwrap_or("")),
            polymer_types: non_empty(raw.polymer_types),
            polymers_number: raw.polymers_number.filter(|v| !v.is_nan()),
            concentration_ug_g: raw.concentration_ug_g.filter(|v| !v.is_nan()),
            common_additives: non_empty(raw.common_additives),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_becomes_null() {
        let raw = RawRecord {
            additive: Some("DEHP".to_string()),
            additive_abbrev: Some("DEHP".to_string()),
            reference: Some("  ".to_string()),
            compartment: Some("Seawater".to_string()),
            polymer_types: Some(String::new()),
            polymers_number: Some(f64::NAN),
            concentration_ug_g: Some(0.4),
            common_additives: None,
        };
        let record = Record::from(raw);
        assert_eq!(record.reference, None);
        assert_eq!(record.polymer_types, None);
        assert_eq!(record.polymers_number, None);
        assert_eq!(record.compartment, Compartment::Seawater);
        assert_eq!(record.concentration_ug_g, Some(0.4));
    }
}
