//! Infrastructure layer - Artifact loading, services, logging and metrics

pub mod artifacts;
pub mod logging;
pub mod observability;
pub mod services;
