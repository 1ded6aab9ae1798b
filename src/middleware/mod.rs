//! Request middleware.

pub mod validate;
pub use validate::{validate_request, ValidationRules};
