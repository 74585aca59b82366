//! The three tiers of the Golden Gate hierarchy.

use crate::error::GgwError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VectorLevel {
    /// Container plasmid; the insert region between the cut sites is excised.
    Backbone,
    /// Single part; only the region between the cut sites is kept.
    Level0,
    /// Level 1 and above, composed from one backbone plus Level0 inserts.
    Level1,
}

impl VectorLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Backbone => "BACKBONE",
            Self::Level0 => "LEVEL0",
            Self::Level1 => "LEVEL1",
        }
    }

    /// Backbones and Level0 parts are imported from circular GenBank records
    /// and digested; Level1 constructs are composed instead.
    pub fn is_digestible(self) -> bool {
        matches!(self, Self::Backbone | Self::Level0)
    }

    pub(crate) fn invalid_for(self, operation: &'static str) -> GgwError {
        GgwError::InvalidLevel {
            operation,
            level: self.label().to_string(),
        }
    }
}

impl fmt::Display for VectorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for VectorLevel {
    type Err = GgwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['_', ' '], "").as_str() {
            "BACKBONE" => Ok(Self::Backbone),
            "LEVEL0" => Ok(Self::Level0),
            "LEVEL1" => Ok(Self::Level1),
            _ => Err(GgwError::InvalidLevel {
                operation: "parsing",
                level: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_leniently() {
        assert_eq!("backbone".parse::<VectorLevel>().unwrap(), VectorLevel::Backbone);
        assert_eq!("Level 0".parse::<VectorLevel>().unwrap(), VectorLevel::Level0);
        assert_eq!("LEVEL_1".parse::<VectorLevel>().unwrap(), VectorLevel::Level1);
        assert!(matches!(
            "level2".parse::<VectorLevel>(),
            Err(GgwError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn serializes_as_screaming_case() {
        let json = serde_json::to_string(&VectorLevel::Level0).unwrap();
        assert_eq!(json, "\"LEVEL0\"");
        assert!(!VectorLevel::Level1.is_digestible());
    }
}
