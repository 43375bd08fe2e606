//! Dataset rows and column naming.

use core::fmt;

use crate::compartment::Compartment;
use crate::error::{CoreError, CoreResult};

/// Named column of the additives dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Additive,
    AdditiveAbbrev,
    Reference,
    Compartment,
    PolymerTypes,
    PolymersNumber,
    Concentration,
    CommonAdditives,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Self::Additive,
        Self::AdditiveAbbrev,
        Self::Reference,
        Self::Compartment,
        Self::PolymerTypes,
        Self::PolymersNumber,
        Self::Concentration,
        Self::CommonAdditives,
    ];

    /// Header text as it appears in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Additive => "Additive",
            Self::AdditiveAbbrev => "Additive Abbrev",
            Self::Reference => "Reference",
            Self::Compartment => "Compartment",
            Self::PolymerTypes => "Polymer Types",
            Self::PolymersNumber => "Polymers Number",
            Self::Concentration => "Concentration(ug/g)",
            Self::CommonAdditives => "Common Additives",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }

    /// Like [`Field::from_column_name`] but reports schema drift as an error.
    pub fn lookup(name: &str) -> CoreResult<Field> {
        Self::from_column_name(name).ok_or_else(|| CoreError::MissingField {
            field: name.to_string(),
        })
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::PolymersNumber | Self::Concentration)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Borrowed view of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    Null,
}

impl<'a> CellValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Display text, with integral numbers printed without a fraction.
    pub fn to_label(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some((*text).to_string()),
            Self::Number(v) => Some(format_number(*v)),
            Self::Null => None,
        }
    }
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn text_cell(value: &Option<String>) -> CellValue<'_> {
    match value {
        Some(text) => CellValue::Text(text),
        None => CellValue::Null,
    }
}

fn number_cell(value: Option<f64>) -> CellValue<'static> {
    match value {
        Some(v) if !v.is_nan() => CellValue::Number(v),
        _ => CellValue::Null,
    }
}

/// One immutable row of the additives dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub additive: Option<String>,
    pub additive_abbrev: Option<String>,
    pub reference: Option<String>,
    pub compartment: Compartment,
    pub polymer_types: Option<String>,
    pub polymers_number: Option<f64>,
    pub concentration_ug_g: Option<f64>,
    pub common_additives: Option<String>,
}

impl Record {
    /// Create a row with the identifying fields set and every measurement null.
    pub fn new(
        additive: impl Into<String>,
        additive_abbrev: impl Into<String>,
        reference: impl Into<String>,
        compartment: Compartment,
    ) -> Self {
        Self {
            additive: Some(additive.into()),
            additive_abbrev: Some(additive_abbrev.into()),
            reference: Some(reference.into()),
            compartment,
            polymer_types: None,
            polymers_number: None,
            concentration_ug_g: None,
            common_additives: None,
        }
    }

    pub fn with_polymer_types(mut self, polymer_types: impl Into<String>) -> Self {
        self.polymer_types = Some(polymer_types.into());
        self
    }

    pub fn with_polymers_number(mut self, n: f64) -> Self {
        self.polymers_number = Some(n);
        self
    }

    pub fn with_concentration(mut self, ug_g: f64) -> Self {
        self.concentration_ug_g = Some(ug_g);
        self
    }

    pub fn with_common_additives(mut self, marker: impl Into<String>) -> Self {
        self.common_additives = Some(marker.into());
        self
    }

    /// Polymer types with null read as the empty string.
    pub fn polymer_types_or_empty(&self) -> &str {
        self.polymer_types.as_deref().unwrap_or("")
    }

    pub fn get(&self, field: Field) -> CellValue<'_> {
        match field {
            Field::Additive => text_cell(&self.additive),
            Field::AdditiveAbbrev => text_cell(&self.additive_abbrev),
            Field::Reference => text_cell(&self.reference),
            Field::Compartment => CellValue::Text(self.compartment.as_str()),
            Field::PolymerTypes => text_cell(&self.polymer_types),
            Field::PolymersNumber => number_cell(self.polymers_number),
            Field::Concentration => number_cell(self.concentration_ug_g),
            Field::CommonAdditives => text_cell(&self.common_additives),
        }
    }
}
