//! Predict command - one prediction without the web form

use clap::Args;

use crate::domain::PredictionInput;

/// Arguments for the predict command; values are taken as typed into the form
#[derive(Args, Clone, Debug)]
pub struct PredictArgs {
    #[arg(long)]
    pub year: String,

    #[arg(long)]
    pub who_region: String,

    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub residence_area_type: String,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}

impl PredictArgs {
    pub fn to_input(&self) -> PredictionInput {
        PredictionInput::new(
            &self.year,
            &self.who_region,
            &self.country,
            &self.residence_area_type,
        )
    }
}

/// Print the prediction, or fail with the same text the form would show
pub async fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.debug);
    let service = crate::create_prediction_service(&config);

    let prediction = service.predict(&args.to_input())?;
    println!("Prediction: {}", prediction);

    Ok(())
}
