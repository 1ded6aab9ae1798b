//! HTTP handlers for template CRUD and service endpoints.

pub mod common;
pub mod template;
pub use common::*;
pub use template::*;
