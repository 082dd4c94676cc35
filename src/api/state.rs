//! Application state for shared services

use std::sync::Arc;

use crate::domain::{ArtifactStatus, DomainError, PredictionInput};
use crate::infrastructure::services::PredictionService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: Arc<dyn PredictionServiceTrait>,
}

impl AppState {
    pub fn new(prediction_service: Arc<dyn PredictionServiceTrait>) -> Self {
        Self { prediction_service }
    }
}

/// Trait for prediction service operations
#[async_trait::async_trait]
pub trait PredictionServiceTrait: Send + Sync {
    async fn predict(&self, input: PredictionInput) -> Result<f64, DomainError>;
    fn is_ready(&self) -> bool;
    fn artifact_statuses(&self) -> Vec<ArtifactStatus>;
}

#[async_trait::async_trait]
impl PredictionServiceTrait for PredictionService {
    async fn predict(&self, input: PredictionInput) -> Result<f64, DomainError> {
        PredictionService::predict(self, &input)
    }

    fn is_ready(&self) -> bool {
        PredictionService::is_ready(self)
    }

    fn artifact_statuses(&self) -> Vec<ArtifactStatus> {
        PredictionService::artifact_statuses(self).to_vec()
    }
}
