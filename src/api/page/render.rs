//! Prediction form page

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::error;

use super::template::{escape_html, PageTemplate};
use crate::domain::DomainError;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>${var:title:Prediction App}</title>
    <link rel="stylesheet" href="${var:stylesheet:/static/style.css}">
</head>
<body>
<h1>${var:heading:Basic and safely managed drinking water predictor}</h1>
<div class="container">
    <h2>Enter data for prediction</h2>
    <form action="/" method="post">
        <label for="feature0">Year:</label>
        <input type="text" name="feature0" id="feature0" required><br>

        <label for="feature1">WHO region:</label>
        <input type="text" name="feature1" id="feature1" required><br>

        <label for="feature2">Country:</label>
        <input type="text" name="feature2" id="feature2" required><br>

        <label for="feature3">Residence Area Type:</label>
        <input type="text" name="feature3" id="feature3" required><br>

        <input type="submit" value="Predict">
    </form>
${var:result:}
</div>
</body>
</html>
"#;

static PAGE: Lazy<PageTemplate> =
    Lazy::new(|| PageTemplate::parse(PAGE_TEMPLATE).expect("page template is well-formed"));

/// What to show under the form after a submission
#[derive(Debug, Clone, PartialEq)]
pub enum PageResult {
    Prediction(f64),
    Error(String),
}

impl From<Result<f64, DomainError>> for PageResult {
    fn from(result: Result<f64, DomainError>) -> Self {
        match result {
            Ok(prediction) => Self::Prediction(prediction),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

impl PageResult {
    fn to_html(&self) -> String {
        match self {
            Self::Prediction(value) => {
                format!("    <h3>Prediction: {}</h3>", escape_html(&value.to_string()))
            }
            Self::Error(message) => {
                format!("    <h3 class=\"error\">Error: {}</h3>", escape_html(message))
            }
        }
    }
}

/// Render the form, plus the result block when there is one
pub fn render_page(result: Option<&PageResult>) -> String {
    let mut values = HashMap::new();

    if let Some(result) = result {
        values.insert("result", result.to_html());
    }

    PAGE.render(&values).unwrap_or_else(|e| {
        error!(error = %e, "Failed to render page template");
        String::from("<!DOCTYPE html><html><body><h1>Prediction App</h1></body></html>")
    })
}
