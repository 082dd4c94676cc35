//! Prediction form handlers
//!
//! `GET /` renders the empty form. `POST /` runs one prediction and renders
//! the form again with the outcome below it. Every failure ends up in the
//! page; none leaves the handler as an error response.

use axum::{extract::State, response::Html};
use tracing::{info, instrument};

use super::page::{render_page, PageResult};
use super::state::AppState;
use super::types::Form;
use crate::domain::PredictionInput;

/// Render the empty form
pub async fn show_form() -> Html<String> {
    Html(render_page(None))
}

/// Handle a form submission
#[instrument(skip_all)]
pub async fn submit_form(
    State(state): State<AppState>,
    Form(input): Form<PredictionInput>,
) -> Html<String> {
    let outcome = state.prediction_service.predict(input).await;

    let result = PageResult::from(outcome);
    if let PageResult::Prediction(value) = &result {
        info!(prediction = %value, "Rendered prediction");
    }

    Html(render_page(Some(&result)))
}
