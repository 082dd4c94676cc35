//! Scaler → model inference pipeline
//!
//! Artifacts are fixed at construction. A pipeline missing either artifact
//! stays not-ready for its whole lifetime and never calls the one it has.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::{ArtifactKind, ArtifactStatus, FeatureScaler, Predictor};
use crate::domain::feature::FeatureVector;
use crate::domain::DomainError;

/// Two chained artifacts plus the record of how loading went
#[derive(Clone)]
pub struct InferencePipeline {
    scaler: Option<Arc<dyn FeatureScaler>>,
    model: Option<Arc<dyn Predictor>>,
    statuses: Vec<ArtifactStatus>,
}

impl InferencePipeline {
    /// Create a ready pipeline from already-loaded artifacts
    pub fn new(scaler: Arc<dyn FeatureScaler>, model: Arc<dyn Predictor>) -> Self {
        Self {
            statuses: vec![
                ArtifactStatus::loaded(ArtifactKind::Scaler, scaler.name()),
                ArtifactStatus::loaded(ArtifactKind::Model, model.name()),
            ],
            scaler: Some(scaler),
            model: Some(model),
        }
    }

    /// Create a pipeline from independent load attempts
    ///
    /// Each failure is logged and recorded; neither aborts the other.
    pub fn from_load_results(
        scaler: (String, Result<Arc<dyn FeatureScaler>, DomainError>),
        model: (String, Result<Arc<dyn Predictor>, DomainError>),
    ) -> Self {
        let (scaler_source, scaler) = scaler;
        let (model_source, model) = model;

        let (scaler, scaler_status) = record(ArtifactKind::Scaler, scaler_source, scaler);
        let (model, model_status) = record(ArtifactKind::Model, model_source, model);

        if let (Some(scaler), Some(model)) = (&scaler, &model) {
            if scaler.n_features() != model.n_features() {
                error!(
                    scaler_features = scaler.n_features(),
                    model_features = model.n_features(),
                    "Scaler and model were fitted on different feature counts"
                );
            }
        }

        Self {
            scaler,
            model,
            statuses: vec![scaler_status, model_status],
        }
    }

    /// True only if both artifacts loaded
    pub fn is_ready(&self) -> bool {
        self.scaler.is_some() && self.model.is_some()
    }

    pub fn artifact_statuses(&self) -> &[ArtifactStatus] {
        &self.statuses
    }

    /// Scale the vector, then predict; returns the first model output
    pub fn predict(&self, vector: &FeatureVector) -> Result<f64, DomainError> {
        let (Some(scaler), Some(model)) = (&self.scaler, &self.model) else {
            return Err(DomainError::NotReady);
        };

        let scaled = scaler
            .transform(vector.as_slice())
            .map_err(|e| stage_error(ArtifactKind::Scaler, e))?;

        debug!(raw = ?vector.as_slice(), scaled = ?scaled, "Features scaled");

        let outputs = model
            .predict(&[scaled])
            .map_err(|e| stage_error(ArtifactKind::Model, e))?;

        let prediction = outputs.first().copied().ok_or_else(|| {
            DomainError::inference(ArtifactKind::Model.as_str(), "model returned no output")
        })?;

        if !prediction.is_finite() {
            return Err(DomainError::inference(
                ArtifactKind::Model.as_str(),
                format!("model produced a non-finite prediction ({})", prediction),
            ));
        }

        Ok(prediction)
    }
}

impl std::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("ready", &self.is_ready())
            .field("statuses", &self.statuses)
            .finish()
    }
}

fn record<T: ?Sized>(
    kind: ArtifactKind,
    source: String,
    result: Result<Arc<T>, DomainError>,
) -> (Option<Arc<T>>, ArtifactStatus) {
    match result {
        Ok(artifact) => {
            info!(artifact = %kind, source = %source, "Artifact loaded successfully");
            (Some(artifact), ArtifactStatus::loaded(kind, source))
        }
        Err(e) => {
            error!(artifact = %kind, source = %source, error = %e, "Error loading artifact");
            (None, ArtifactStatus::failed(kind, source, e.to_string()))
        }
    }
}

/// Wrap artifact failures so the message names the stage that failed
fn stage_error(kind: ArtifactKind, err: DomainError) -> DomainError {
    match err {
        DomainError::Inference { .. } => err,
        other => DomainError::inference(kind.as_str(), other.to_string()),
    }
}
