//! Environmental compartments.

use core::fmt;
use core::str::FromStr;

use crate::error::CoreError;

/// Medium where a sample was measured.
///
/// Text outside the four known media is preserved as [`Compartment::Other`]
/// so the row survives loading, but it never matches a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Compartment {
    Plastic,
    Sediment,
    Seawater,
    Biota,
    Other(String),
}

impl Compartment {
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "Plastic" => Self::Plastic,
            "Sediment" => Self::Sediment,
            "Seawater" => Self::Seawater,
            "Biota" => Self::Biota,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Plastic => "Plastic",
            Self::Sediment => "Sediment",
            Self::Seawater => "Seawater",
            Self::Biota => "Biota",
            Self::Other(text) => text,
        }
    }

    pub fn is_plastic(&self) -> bool {
        matches!(self, Self::Plastic)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Compartment {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<Compartment> for String {
    fn from(compartment: Compartment) -> Self {
        compartment.as_str().to_string()
    }
}

impl From<CompartmentChoice> for Compartment {
    fn from(choice: CompartmentChoice) -> Self {
        match choice {
            CompartmentChoice::Sediment => Self::Sediment,
            CompartmentChoice::Seawater => Self::Seawater,
            CompartmentChoice::Biota => Self::Biota,
        }
    }
}

/// The compartments a user can compare against the Plastic baseline.
///
/// `Plastic` is always part of a filtered view and is therefore not a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompartmentChoice {
    #[default]
    Sediment,
    Seawater,
    Biota,
}

impl CompartmentChoice {
    pub const ALL: [CompartmentChoice; 3] = [Self::Sediment, Self::Seawater, Self::Biota];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sediment => "Sediment",
            Self::Seawater => "Seawater",
            Self::Biota => "Biota",
        }
    }

    /// True when `compartment` is this choice.
    pub fn matches(self, compartment: &Compartment) -> bool {
        Compartment::from(self) == *compartment
    }
}

impl fmt::Display for CompartmentChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompartmentChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(choice) = Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
        {
            return Ok(choice);
        }
        if trimmed.eq_ignore_ascii_case("plastic") {
            return Err(CoreError::NotSelectable {
                value: trimmed.to_string(),
            });
        }
        Err(CoreError::UnknownCompartment {
            value: trimmed.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!(Compartment::parse("Plastic"), Compartment::Plastic);
        assert_eq!(Compartment::parse(" Biota "), Compartment::Biota);
        let other = Compartment::parse("Air");
        assert_eq!(other, Compartment::Other("Air".to_string()));
        assert!(!other.is_recognized());
        assert_eq!(other.as_str(), "Air");
    }

    #[test]
    fn choice_from_str_is_case_insensitive() {
        assert_eq!(
            "seawater".parse::<CompartmentChoice>().unwrap(),
            CompartmentChoice::Seawater
        );
        assert!(matches!(
            "Plastic".parse::<CompartmentChoice>(),
            Err(CoreError::NotSelectable { .. })
        ));
        assert!(matches!(
            "Air".parse::<CompartmentChoice>(),
            Err(CoreError::UnknownCompartment { .. })
        ));
    }

    #[test]
    fn choice_matches_its_compartment_only() {
        assert!(CompartmentChoice::Biota.matches(&Compartment::Biota));
        assert!(!CompartmentChoice::Biota.matches(&Compartment::Plastic));
        assert_eq!(CompartmentChoice::default(), CompartmentChoice::Sediment);
    }
}
