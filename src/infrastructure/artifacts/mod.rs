//! Artifact infrastructure - Fitted scaler/model parameters loaded from JSON files

mod loader;
mod model;
mod scaler;

pub use loader::{load_model, load_pipeline, load_scaler, ArtifactPaths};
pub use model::{Aggregation, LinearModel, ModelArtifact, RegressionTree, TreeEnsemble, TreeNode};
pub use scaler::{MinMaxScaler, ScalerArtifact, StandardScaler};
