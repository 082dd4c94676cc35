//! Prediction service - Form input to model output for one request

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::{
    ArtifactStatus, DomainError, FeatureVectorBuilder, InferencePipeline, PredictionInput,
};
use crate::infrastructure::observability::record_prediction;

/// Runs readiness check, vector building and inference in that order
#[derive(Debug, Clone)]
pub struct PredictionService {
    builder: FeatureVectorBuilder,
    pipeline: Arc<InferencePipeline>,
}

impl PredictionService {
    /// Create a new PredictionService over a loaded pipeline
    pub fn new(builder: FeatureVectorBuilder, pipeline: Arc<InferencePipeline>) -> Self {
        Self { builder, pipeline }
    }

    pub fn is_ready(&self) -> bool {
        self.pipeline.is_ready()
    }

    pub fn artifact_statuses(&self) -> &[ArtifactStatus] {
        self.pipeline.artifact_statuses()
    }

    /// Predict from raw form input
    ///
    /// A not-ready pipeline short-circuits before the input is even parsed.
    pub fn predict(&self, input: &PredictionInput) -> Result<f64, DomainError> {
        let start = Instant::now();
        let result = self.run(input);

        match &result {
            Ok(prediction) => debug!(prediction = %prediction, "Prediction completed"),
            Err(e) => warn!(kind = e.kind(), error = %e, "Prediction failed"),
        }
        record_prediction(&result, start.elapsed());

        result
    }

    fn run(&self, input: &PredictionInput) -> Result<f64, DomainError> {
        if !self.pipeline.is_ready() {
            return Err(DomainError::NotReady);
        }

        let vector = self.builder.build_from(input)?;
        debug!(features = ?vector.as_slice(), "Feature vector built");

        self.pipeline.predict(&vector)
    }
}
