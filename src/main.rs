use clap::Parser;
use safewater_predictor::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Command::Serve(Default::default())) {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::Predict(args) => cli::predict::run(args).await,
        Command::Check(args) => cli::check::run(args).await,
    }
}
