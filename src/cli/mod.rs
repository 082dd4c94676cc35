//! CLI module for the drinking water predictor
//!
//! Provides subcommands:
//! - `serve`: web form server (default)
//! - `predict`: one prediction from the command line
//! - `check`: load the artifacts and report whether they are usable

pub mod check;
pub mod predict;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Basic and safely managed drinking water predictor
#[derive(Parser)]
#[command(name = "safewater-predictor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web form server (default mode)
    Serve(serve::ServeArgs),

    /// Predict from command-line inputs
    Predict(predict::PredictArgs),

    /// Validate the configured artifacts
    Check(check::CheckArgs),
}

/// Load layered configuration and install logging
///
/// Falls back to defaults when the configuration cannot be read; the
/// failure is logged once logging is up.
pub(crate) fn load_config(debug: bool) -> AppConfig {
    dotenvy::dotenv().ok();

    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let config = config.with_debug(debug);

    logging::init_logging(&config.logging);

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    config
}
