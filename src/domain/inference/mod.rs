//! Inference domain - Scaler and model contracts chained into one pipeline

mod artifact;
mod pipeline;

pub use artifact::{ArtifactKind, ArtifactStatus, FeatureScaler, Predictor};
pub use pipeline::InferencePipeline;

#[cfg(test)]
pub use artifact::{MockFeatureScaler, MockPredictor};
