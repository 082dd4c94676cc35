//! Presentation layer - The prediction form and its result block

mod render;
mod template;

pub use render::{render_page, PageResult};
pub use template::{escape_html, PageTemplate, TemplateError, TemplateVariable};
