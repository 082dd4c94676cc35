//! Raw prediction input as submitted by the form

use serde::{Deserialize, Serialize};

/// The four user-entered fields, untouched
///
/// Form field names are positional (`feature0`..`feature3`). Missing fields
/// deserialize to empty strings so they fail the same way a blank entry does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(rename = "feature0", default)]
    pub year: String,

    #[serde(rename = "feature1", default)]
    pub who_region: String,

    #[serde(rename = "feature2", default)]
    pub country: String,

    #[serde(rename = "feature3", default)]
    pub residence_area_type: String,
}

impl PredictionInput {
    pub fn new(
        year: impl Into<String>,
        who_region: impl Into<String>,
        country: impl Into<String>,
        residence_area_type: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            who_region: who_region.into(),
            country: country.into(),
            residence_area_type: residence_area_type.into(),
        }
    }
}
