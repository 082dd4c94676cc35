//! Feature vector assembly

use serde::Serialize;

use super::PredictionInput;
use crate::domain::category::{CategoryField, CategoryMapper};
use crate::domain::DomainError;

/// Number of features the scaler and model were fitted on
pub const FEATURE_COUNT: usize = 4;

/// Ordered model input: `[year, region_code, country_code, area_code]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(year: i64, region_code: u32, country_code: u32, area_code: u32) -> Self {
        Self([
            year as f64,
            f64::from(region_code),
            f64::from(country_code),
            f64::from(area_code),
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Builds feature vectors from raw form strings
#[derive(Debug, Clone)]
pub struct FeatureVectorBuilder {
    mapper: CategoryMapper,
}

impl FeatureVectorBuilder {
    pub fn new(mapper: CategoryMapper) -> Self {
        Self { mapper }
    }

    /// Parse the year and resolve the three categorical labels
    ///
    /// The year is a signed 64-bit integer after trimming; an optional
    /// leading `+` is accepted. Digit strings beyond the `i64` range are a
    /// parse error rather than an arbitrary-precision value.
    pub fn build(
        &self,
        year: &str,
        who_region: &str,
        country: &str,
        residence_area_type: &str,
    ) -> Result<FeatureVector, DomainError> {
        let year_value = year
            .trim()
            .parse::<i64>()
            .map_err(|e| DomainError::parse("year", year, e.to_string()))?;

        Ok(FeatureVector::new(
            year_value,
            self.mapper.resolve(CategoryField::WhoRegion, who_region),
            self.mapper.resolve(CategoryField::Country, country),
            self.mapper
                .resolve(CategoryField::ResidenceAreaType, residence_area_type),
        ))
    }

    pub fn build_from(&self, input: &PredictionInput) -> Result<FeatureVector, DomainError> {
        self.build(
            &input.year,
            &input.who_region,
            &input.country,
            &input.residence_area_type,
        )
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new(CategoryMapper::standard().clone())
    }
}
