//! Fitted feature scalers

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, FeatureScaler};

/// Scaler artifact as exported by the training side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Check parameter consistency before the scaler is used
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Standard(s) => validate_params("mean", &s.mean, "scale", &s.scale),
            Self::MinMax(s) => validate_params("min", &s.min, "scale", &s.scale),
        }
    }

    pub fn into_scaler(self) -> Arc<dyn FeatureScaler> {
        match self {
            Self::Standard(s) => Arc::new(s),
            Self::MinMax(s) => Arc::new(s),
        }
    }
}

/// Standardization: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, DomainError> {
        check_width(features, self.mean.len(), "StandardScaler")?;

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / non_zero(*scale))
            .collect())
    }

    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn name(&self) -> &'static str {
        "StandardScaler"
    }
}

/// Range scaling: `x * scale + min`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { min, scale }
    }
}

impl FeatureScaler for MinMaxScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, DomainError> {
        check_width(features, self.min.len(), "MinMaxScaler")?;

        Ok(features
            .iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (min, scale))| x * scale + min)
            .collect())
    }

    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn name(&self) -> &'static str {
        "MinMaxScaler"
    }
}

/// Constant features are fitted with a zero scale; divide by one instead
fn non_zero(scale: f64) -> f64 {
    if scale == 0.0 { 1.0 } else { scale }
}

fn check_width(features: &[f64], expected: usize, name: &str) -> Result<(), DomainError> {
    if features.len() != expected {
        return Err(DomainError::inference(
            "scaler",
            format!(
                "X has {} features, but {} is expecting {} features as input",
                features.len(),
                name,
                expected
            ),
        ));
    }

    Ok(())
}

fn validate_params(
    offset_name: &str,
    offset: &[f64],
    scale_name: &str,
    scale: &[f64],
) -> Result<(), String> {
    if offset.is_empty() {
        return Err(format!("'{}' must not be empty", offset_name));
    }

    if offset.len() != scale.len() {
        return Err(format!(
            "'{}' has {} entries but '{}' has {}",
            offset_name,
            offset.len(),
            scale_name,
            scale.len()
        ));
    }

    if offset.iter().chain(scale).any(|v| !v.is_finite()) {
        return Err("scaler parameters must be finite".to_string());
    }

    Ok(())
}
