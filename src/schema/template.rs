//! Schemas for the template endpoints.

use super::{FieldKind, ObjectSchema};

/// `{ name, content }`, both required non-empty strings.
pub fn create_template_body() -> ObjectSchema {
    ObjectSchema::new()
        .required("name", FieldKind::String)
        .required("content", FieldKind::String)
}

/// Route parameters `{ id }`.
pub fn template_id_params() -> ObjectSchema {
    ObjectSchema::new().required("id", FieldKind::String)
}

/// `{ data: { name?, content? } }`; `data` is required, its fields are not.
pub fn update_template_body() -> ObjectSchema {
    ObjectSchema::new().required(
        "data",
        FieldKind::Object(
            ObjectSchema::new()
                .optional("name", FieldKind::String)
                .optional("content", FieldKind::String),
        ),
    )
}
