//! Safe drinking water predictor
//!
//! A single-page web form that estimates basic and safely managed drinking
//! water coverage from four inputs:
//! - Year of the observation
//! - WHO region, country and residence area type, encoded by fixed tables
//!
//! The inputs are scaled and fed to a regression model, both loaded once at
//! startup from exported artifact files.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::FeatureVectorBuilder;
use infrastructure::artifacts::load_pipeline;
use infrastructure::observability::record_artifact_statuses;
use infrastructure::services::PredictionService;

/// Create the prediction service from configuration
///
/// Artifact load failures are recorded on the pipeline rather than returned;
/// the service still starts and reports itself not ready.
pub fn create_prediction_service(config: &AppConfig) -> PredictionService {
    let pipeline = load_pipeline(&config.artifacts.paths());
    record_artifact_statuses(pipeline.artifact_statuses());

    PredictionService::new(FeatureVectorBuilder::default(), Arc::new(pipeline))
}

/// Create application state from configuration
pub fn create_app_state(config: &AppConfig) -> AppState {
    AppState::new(Arc::new(create_prediction_service(config)))
}
