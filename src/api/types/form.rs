//! Form extractor that answers rejections with the rendered page

use axum::{
    extract::{FromRequest, Request},
    response::{Html, IntoResponse, Response},
    Form as AxumForm,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::api::page::{render_page, PageResult};

/// Wrapper around `axum::Form` whose rejection is the form page itself
///
/// An unreadable submission is reported to the user like any other
/// prediction failure instead of surfacing as a transport error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Form<T>(pub T);

/// Form rejection rendered into the page's error block
#[derive(Debug)]
pub struct FormRejection {
    message: String,
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        Html(render_page(Some(&PageResult::Error(self.message)))).into_response()
    }
}

impl<S, T> FromRequest<S> for Form<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumForm::<T>::from_request(req, state).await {
            Ok(AxumForm(value)) => Ok(Form(value)),
            Err(rejection) => {
                let message = format_rejection_message(&rejection);
                warn!(status = %rejection.status(), error = %message, "Rejected form submission");

                Err(FormRejection { message })
            }
        }
    }
}

/// Format the rejection message to be more user-friendly
fn format_rejection_message(rejection: &axum::extract::rejection::FormRejection) -> String {
    use axum::extract::rejection::FormRejection::*;

    match rejection {
        InvalidFormContentType(_) => {
            "Invalid Content-Type header. Expected 'application/x-www-form-urlencoded'."
                .to_string()
        }
        FailedToDeserializeForm(err) => format!("Invalid form data: {}", err.body_text()),
        FailedToDeserializeFormBody(err) => format!("Invalid form data: {}", err.body_text()),
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid form submission".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_form_rejection_into_response() {
        let rejection = FormRejection {
            message: "Test error".to_string(),
        };

        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
