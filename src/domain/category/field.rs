//! Categorical field identifiers

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A categorical input of the prediction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    WhoRegion,
    Country,
    ResidenceAreaType,
}

impl CategoryField {
    /// All categorical fields in feature-vector order
    pub const ALL: [CategoryField; 3] = [Self::WhoRegion, Self::Country, Self::ResidenceAreaType];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhoRegion => "who_region",
            Self::Country => "country",
            Self::ResidenceAreaType => "residence_area_type",
        }
    }
}

impl std::fmt::Display for CategoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown category field: {0}")]
pub struct UnknownCategoryField(pub String);

impl FromStr for CategoryField {
    type Err = UnknownCategoryField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "who_region" => Ok(Self::WhoRegion),
            "country" => Ok(Self::Country),
            "residence_area_type" => Ok(Self::ResidenceAreaType),
            other => Err(UnknownCategoryField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_round_trip() {
        for field in CategoryField::ALL {
            assert_eq!(field.as_str().parse::<CategoryField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_name() {
        let err = "continent".parse::<CategoryField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown category field: continent");
    }

    #[test]
    fn test_field_serialization() {
        assert_eq!(
            serde_json::to_string(&CategoryField::ResidenceAreaType).unwrap(),
            "\"residence_area_type\""
        );
    }
}
