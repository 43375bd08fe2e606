//! Polymer-type vocabulary offered by the filter controls.

use core::fmt;
use core::str::FromStr;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolymerType {
    PP,
    PE,
    PS,
    Polyester,
    PVC,
    Nylon,
    PET,
    PA,
    PUR,
}

impl PolymerType {
    /// Control order, which is also the default selection.
    pub const ALL: [PolymerType; 9] = [
        Self::PP,
        Self::PE,
        Self::PS,
        Self::Polyester,
        Self::PVC,
        Self::Nylon,
        Self::PET,
        Self::PA,
        Self::PUR,
    ];

    pub fn abbrev(self) -> &'static str {
        match self {
            Self::PP => "PP",
            Self::PE => "PE",
            Self::PS => "PS",
            Self::Polyester => "Polyester",
            Self::PVC => "PVC",
            Self::Nylon => "Nylon",
            Self::PET => "PET",
            Self::PA => "PA",
            Self::PUR => "PUR",
        }
    }
}

impl fmt::Display for PolymerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for PolymerType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.abbrev().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownPolymer {
                value: trimmed.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_abbrev() {
        for polymer in PolymerType::ALL {
            assert_eq!(polymer.abbrev().parse::<PolymerType>().unwrap(), polymer);
        }
        assert_eq!("nylon".parse::<PolymerType>().unwrap(), PolymerType::Nylon);
        assert!("HDPE".parse::<PolymerType>().is_err());
    }
}
