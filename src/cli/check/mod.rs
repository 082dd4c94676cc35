//! Check command - load both artifacts and report the outcome

use clap::Args;

/// Arguments for the check command
#[derive(Args, Clone, Debug, Default)]
pub struct CheckArgs {
    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}

/// Exit non-zero unless both artifacts load
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.debug);
    let service = crate::create_prediction_service(&config);

    for status in service.artifact_statuses() {
        match &status.error {
            None => println!("{:<7} ok      {}", status.kind.as_str(), status.source),
            Some(error) => println!("{:<7} FAILED  {}", status.kind.as_str(), error),
        }
    }

    if !service.is_ready() {
        anyhow::bail!(crate::domain::NOT_LOADED_MESSAGE);
    }

    Ok(())
}
