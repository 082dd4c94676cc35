//! Inference artifact traits and load status

use serde::Serialize;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A fitted feature scaler
#[cfg_attr(test, automock)]
pub trait FeatureScaler: Send + Sync {
    /// Transform one raw feature row into the normalized space
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, DomainError>;

    /// Number of features the scaler was fitted on
    fn n_features(&self) -> usize;

    /// Short scaler family name, used in error messages and logs
    fn name(&self) -> &'static str;
}

/// A fitted predictive model
#[cfg_attr(test, automock)]
pub trait Predictor: Send + Sync {
    /// Predict one output per input row
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, DomainError>;

    /// Number of features the model was fitted on
    fn n_features(&self) -> usize;

    /// Short model family name, used in error messages and logs
    fn name(&self) -> &'static str;
}

/// Which pipeline stage an artifact fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Scaler,
    Model,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scaler => "scaler",
            Self::Model => "model",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of loading one artifact at startup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactStatus {
    pub kind: ArtifactKind,
    pub source: String,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArtifactStatus {
    pub fn loaded(kind: ArtifactKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            loaded: true,
            error: None,
        }
    }

    pub fn failed(kind: ArtifactKind, source: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            loaded: false,
            error: Some(error.into()),
        }
    }
}
