//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::{error_body, error_body_with_details};
use crate::schema::FieldError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Faults raised by a [`crate::store::TemplateStore`]. Absence is never an error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("unknown sort order: {0}")]
    UnknownSortOrder(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Operation faults surfaced by [`crate::service::TemplateService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("create failed")]
    Create(#[source] StoreError),
    #[error("fetch failed")]
    Fetch(#[source] StoreError),
    #[error("update failed")]
    Update(#[source] StoreError),
    #[error("delete failed")]
    Delete(#[source] StoreError),
}

impl ServiceError {
    pub fn cause(&self) -> &StoreError {
        match self {
            ServiceError::Create(e)
            | ServiceError::Fetch(e)
            | ServiceError::Update(e)
            | ServiceError::Delete(e) => e,
        }
    }
}

/// Errors returned by HTTP handlers. Messages are the public wire text; causes stay in logs.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{message}")]
    Validation {
        message: &'static str,
        details: Vec<FieldError>,
    },
    #[error("{0}")]
    Internal(&'static str),
    #[error("{0}")]
    Unavailable(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(error_body(msg))).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(error_body(msg))).into_response(),
            ApiError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                Json(error_body_with_details(message, details)),
            )
                .into_response(),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error_body(msg))).into_response()
            }
            ApiError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(crate::response::message_body(msg)),
            )
                .into_response(),
        }
    }
}
