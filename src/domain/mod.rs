//! Domain layer - Category tables, feature vectors and the inference contracts

pub mod category;
pub mod error;
pub mod feature;
pub mod inference;

pub use category::{CategoryField, CategoryMap, CategoryMapper, UNKNOWN_CATEGORY_CODE};
pub use error::{DomainError, NOT_LOADED_MESSAGE};
pub use feature::{FeatureVector, FeatureVectorBuilder, PredictionInput, FEATURE_COUNT};
pub use inference::{ArtifactKind, ArtifactStatus, FeatureScaler, InferencePipeline, Predictor};
