use thiserror::Error;

/// Message shown for every prediction request when an artifact failed to load
pub const NOT_LOADED_MESSAGE: &str =
    "Model or scaler not loaded correctly. Please check the files.";

/// Core domain errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    #[error("Failed to load {artifact} from '{path}': {message}")]
    ArtifactLoad {
        artifact: String,
        path: String,
        message: String,
    },

    #[error("invalid literal for {field}: '{input}' ({message})")]
    Parse {
        field: String,
        input: String,
        message: String,
    },

    #[error("{stage} failed: {message}")]
    Inference { stage: String, message: String },

    #[error("{}", NOT_LOADED_MESSAGE)]
    NotReady,
}

impl DomainError {
    pub fn artifact_load(
        artifact: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse(
        field: impl Into<String>,
        input: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            field: field.into(),
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn inference(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inference {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArtifactLoad { .. } => "artifact_load",
            Self::Parse { .. } => "parse",
            Self::Inference { .. } => "inference",
            Self::NotReady => "not_ready",
        }
    }
}
