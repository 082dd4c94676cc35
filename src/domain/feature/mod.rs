//! Feature domain - Raw form input and the fixed-order model feature vector

mod input;
mod vector;

pub use input::PredictionInput;
pub use vector::{FeatureVector, FeatureVectorBuilder, FEATURE_COUNT};
