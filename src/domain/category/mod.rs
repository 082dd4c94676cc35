//! Category domain - Fixed label-to-code tables for categorical form fields

mod field;
mod map;

pub use field::{CategoryField, UnknownCategoryField};
pub use map::{CategoryMap, CategoryMapper, UNKNOWN_CATEGORY_CODE};
