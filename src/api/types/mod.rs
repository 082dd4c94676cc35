//! Request extractors

mod form;

pub use form::{Form, FormRejection};
