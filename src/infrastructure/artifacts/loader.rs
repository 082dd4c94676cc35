//! Startup loading of the scaler and model artifacts

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ModelArtifact, ScalerArtifact};
use crate::domain::{ArtifactKind, DomainError, FeatureScaler, InferencePipeline, Predictor};

/// Where the two artifact files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    pub fn new(scaler: impl Into<PathBuf>, model: impl Into<PathBuf>) -> Self {
        Self {
            scaler: scaler.into(),
            model: model.into(),
        }
    }
}

/// Load and validate a scaler artifact
pub fn load_scaler(path: &Path) -> Result<Arc<dyn FeatureScaler>, DomainError> {
    let artifact: ScalerArtifact = read_artifact(ArtifactKind::Scaler, path)?;

    artifact
        .validate()
        .map_err(|message| load_error(ArtifactKind::Scaler, path, message))?;

    Ok(artifact.into_scaler())
}

/// Load and validate a model artifact
pub fn load_model(path: &Path) -> Result<Arc<dyn Predictor>, DomainError> {
    let artifact: ModelArtifact = read_artifact(ArtifactKind::Model, path)?;

    artifact
        .validate()
        .map_err(|message| load_error(ArtifactKind::Model, path, message))?;

    Ok(artifact.into_predictor())
}

/// Attempt both loads independently and build the pipeline from the outcome
///
/// Never fails: a missing or broken artifact yields a not-ready pipeline.
pub fn load_pipeline(paths: &ArtifactPaths) -> InferencePipeline {
    InferencePipeline::from_load_results(
        (
            paths.scaler.display().to_string(),
            load_scaler(&paths.scaler),
        ),
        (paths.model.display().to_string(), load_model(&paths.model)),
    )
}

fn read_artifact<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, DomainError> {
    debug!(artifact = %kind, path = %path.display(), "Reading artifact");

    let content = fs::read_to_string(path).map_err(|e| load_error(kind, path, e.to_string()))?;

    serde_json::from_str(&content)
        .map_err(|e| load_error(kind, path, format!("Invalid artifact JSON: {}", e)))
}

fn load_error(kind: ArtifactKind, path: &Path, message: impl Into<String>) -> DomainError {
    DomainError::artifact_load(kind.as_str(), path.display().to_string(), message)
}
