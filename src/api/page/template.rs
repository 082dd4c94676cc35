//! Page template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value
//!
//! Substitution is a single pass, so values are never re-scanned for
//! placeholders.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-a-zA-Z0-9]*)(?::([^}]*))?\}").unwrap()
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template parsing error: {message}")]
    ParseError { message: String },
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariable {
    pub name: String,
    pub default: Option<String>,
}

impl TemplateVariable {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A parsed page template
#[derive(Debug, Clone)]
pub struct PageTemplate {
    content: String,
    variables: Vec<TemplateVariable>,
}

impl PageTemplate {
    /// Parse a template string and extract variables
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();

        let placeholders = content.matches("${var:").count();
        let matched = VARIABLE_PATTERN.find_iter(&content).count();
        if placeholders != matched {
            return Err(TemplateError::ParseError {
                message: format!(
                    "{} malformed placeholder(s)",
                    placeholders.saturating_sub(matched)
                ),
            });
        }

        let mut variables = Vec::new();
        let mut seen_names = HashSet::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();

            if !seen_names.insert(name.clone()) {
                continue;
            }

            variables.push(TemplateVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Ok(Self { content, variables })
    }

    pub fn variables(&self) -> &[TemplateVariable] {
        &self.variables
    }

    /// Render the template with provided values
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self
            .variables
            .iter()
            .find(|v| v.is_required() && !values.contains_key(v.name.as_str()))
        {
            return Err(TemplateError::MissingVariable {
                name: missing.name.clone(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures| {
            values
                .get(&cap[1])
                .cloned()
                .or_else(|| cap.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}

/// Escape text for safe interpolation into HTML
pub fn escape_html(s: &str) -> String {
    v_htmlescape::escape(s).to_string()
}
