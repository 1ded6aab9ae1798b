//! Schema validation of route params, query string, and JSON body before a handler runs.
//!
//! Slices are checked in the fixed order params, query, body. The first failing slice ends
//! the request with 400; later slices are not inspected.

use crate::config::DEFAULT_BODY_LIMIT_BYTES;
use crate::error::ApiError;
use crate::schema::{FieldError, Schema};
use axum::{
    body::{Body, Bytes},
    extract::{FromRequestParts, Query, RawPathParams, Request, State},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Which request slices to validate, and against what.
#[derive(Clone)]
pub struct ValidationRules {
    params: Option<Arc<dyn Schema>>,
    query: Option<Arc<dyn Schema>>,
    body: Option<Arc<dyn Schema>>,
    body_limit: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            params: None,
            query: None,
            body: None,
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(mut self, schema: impl Schema + 'static) -> Self {
        self.params = Some(Arc::new(schema));
        self
    }

    pub fn query(mut self, schema: impl Schema + 'static) -> Self {
        self.query = Some(Arc::new(schema));
        self
    }

    pub fn body(mut self, schema: impl Schema + 'static) -> Self {
        self.body = Some(Arc::new(schema));
        self
    }

    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }
}

/// Use with `axum::middleware::from_fn_with_state(rules, validate_request)`.
pub async fn validate_request(State(rules): State<ValidationRules>, request: Request, next: Next) -> Response {
    match check(&rules, request).await {
        Ok(request) => next.run(request).await,
        Err(rejection) => rejection.into_response(),
    }
}

async fn check(rules: &ValidationRules, request: Request) -> Result<Request, ApiError> {
    let (mut parts, body) = request.into_parts();

    if let Some(schema) = &rules.params {
        let params = path_params(&mut parts).await;
        run(schema.as_ref(), &params, "params", "Invalid params", &parts)?;
    }

    if let Some(schema) = &rules.query {
        let query = query_params(&parts.uri).map_err(|e| {
            tracing::warn!(error = %e, uri = %parts.uri, "request rejected: malformed query");
            ApiError::Validation {
                message: "Invalid query",
                details: Vec::new(),
            }
        })?;
        run(schema.as_ref(), &query, "query", "Invalid query", &parts)?;
    }

    let body = match &rules.body {
        None => body,
        Some(schema) => {
            let bytes = read_body(&parts, body, rules.body_limit).await?;
            let value = json_object(&parts, &bytes)?;
            run(schema.as_ref(), &value, "body", "Invalid body", &parts)?;
            Body::from(bytes)
        }
    };

    Ok(Request::from_parts(parts, body))
}

fn run(schema: &dyn Schema, value: &Value, slice: &str, message: &'static str, parts: &Parts) -> Result<(), ApiError> {
    schema.validate(value).map_err(|details| {
        tracing::warn!(
            slice = slice,
            method = %parts.method,
            uri = %parts.uri,
            errors = ?details,
            "request rejected"
        );
        ApiError::Validation { message, details }
    })
}

/// Route parameters as a JSON object of strings; empty when the route has none.
async fn path_params(parts: &mut Parts) -> Value {
    let mut map = Map::new();
    if let Ok(raw) = RawPathParams::from_request_parts(parts, &()).await {
        for (key, value) in &raw {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(map)
}

fn query_params(uri: &Uri) -> Result<Value, axum::extract::rejection::QueryRejection> {
    let Query(pairs) = Query::<HashMap<String, String>>::try_from_uri(uri)?;
    Ok(Value::Object(
        pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
    ))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// Buffer the body. A non-JSON content type or an empty payload counts as no body.
async fn read_body(parts: &Parts, body: Body, limit: usize) -> Result<Bytes, ApiError> {
    let not_provided = || {
        tracing::warn!(method = %parts.method, uri = %parts.uri, "request rejected: body not provided");
        ApiError::Validation {
            message: "Body not provided",
            details: Vec::new(),
        }
    };
    if !is_json(&parts.headers) {
        return Err(not_provided());
    }
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        tracing::warn!(error = %e, uri = %parts.uri, "request rejected: unreadable body");
        ApiError::Validation {
            message: "Invalid JSON body",
            details: Vec::new(),
        }
    })?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(not_provided());
    }
    Ok(bytes)
}

fn json_object(parts: &Parts, bytes: &Bytes) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!(error = %e, uri = %parts.uri, "request rejected: malformed JSON");
        ApiError::Validation {
            message: "Invalid JSON body",
            details: Vec::new(),
        }
    })?;
    if !value.is_object() {
        tracing::warn!(uri = %parts.uri, "request rejected: body is not an object");
        return Err(ApiError::Validation {
            message: "Body must be an object",
            details: vec![FieldError {
                field: "value".into(),
                message: "must be an object".into(),
            }],
        });
    }
    Ok(value)
}
