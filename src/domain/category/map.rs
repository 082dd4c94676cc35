//! Literal category tables and lookups
//!
//! Labels are matched exactly (case-sensitive). Anything outside a table
//! resolves to [`UNKNOWN_CATEGORY_CODE`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use super::CategoryField;

/// Code assigned to labels missing from a table
pub const UNKNOWN_CATEGORY_CODE: u32 = 0;

const WHO_REGION_TABLE: &[(&str, u32)] = &[
    ("Africa", 1),
    ("Europe", 2),
    ("Americas", 3),
    ("Eastern Mediterranean", 4),
    ("Western Pacific", 5),
    ("South-East Asia", 6),
];

// Incomplete on purpose: the data owner decides which countries the model covers.
const COUNTRY_TABLE: &[(&str, u32)] = &[("India", 1), ("USA", 2), ("France", 3)];

const RESIDENCE_AREA_TYPE_TABLE: &[(&str, u32)] = &[("Urban", 1), ("Rural", 2)];

static STANDARD_MAPPER: Lazy<CategoryMapper> = Lazy::new(|| CategoryMapper {
    who_region: CategoryMap::from_table(CategoryField::WhoRegion, WHO_REGION_TABLE),
    country: CategoryMap::from_table(CategoryField::Country, COUNTRY_TABLE),
    residence_area_type: CategoryMap::from_table(
        CategoryField::ResidenceAreaType,
        RESIDENCE_AREA_TYPE_TABLE,
    ),
});

/// Immutable label-to-code table for one categorical field
#[derive(Debug, Clone)]
pub struct CategoryMap {
    field: CategoryField,
    codes: HashMap<&'static str, u32>,
}

impl CategoryMap {
    /// Build a map from a literal table
    pub fn from_table(field: CategoryField, table: &[(&'static str, u32)]) -> Self {
        Self {
            field,
            codes: table.iter().copied().collect(),
        }
    }

    /// Look up a label, falling back to [`UNKNOWN_CATEGORY_CODE`]
    pub fn code_for(&self, label: &str) -> u32 {
        match self.codes.get(label) {
            Some(code) => *code,
            None => {
                debug!(
                    field = %self.field,
                    label = %label,
                    known = ?self.labels(),
                    "Unknown category label, using code 0"
                );
                UNKNOWN_CATEGORY_CODE
            }
        }
    }

    /// Known labels, ordered by code
    pub fn labels(&self) -> Vec<&'static str> {
        let mut entries: Vec<_> = self.codes.iter().collect();
        entries.sort_by_key(|(_, code)| **code);
        entries.into_iter().map(|(label, _)| *label).collect()
    }
}

/// Resolves categorical labels for every form field
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    who_region: CategoryMap,
    country: CategoryMap,
    residence_area_type: CategoryMap,
}

impl CategoryMapper {
    /// The mapper built from the literal tables the model was trained with
    pub fn standard() -> &'static CategoryMapper {
        &STANDARD_MAPPER
    }

    pub fn map(&self, field: CategoryField) -> &CategoryMap {
        match field {
            CategoryField::WhoRegion => &self.who_region,
            CategoryField::Country => &self.country,
            CategoryField::ResidenceAreaType => &self.residence_area_type,
        }
    }

    /// Resolve a raw label to its integer code; total over all strings
    pub fn resolve(&self, field: CategoryField, raw_value: &str) -> u32 {
        self.map(field).code_for(raw_value)
    }
}
