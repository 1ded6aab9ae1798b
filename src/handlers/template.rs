//! Template CRUD handlers: list, read, create, update, delete.
//!
//! Service faults are already logged with their cause; responses carry only a fixed message.

use crate::error::ApiError;
use crate::model::{CreateTemplate, ListTemplates, Template, UpdateTemplate, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;

/// `page`/`limit` that are missing, non-numeric, or zero fall back to the defaults.
fn positive(params: &HashMap<String, String>, key: &str, default: u32) -> u32 {
    params
        .get(key)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn non_empty(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

/// An id that cannot be extracted (e.g. not valid UTF-8) is answered in JSON like every other error.
fn template_id(id: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    let Path(id) = id.map_err(|e| {
        tracing::warn!(error = %e, "template id rejected");
        ApiError::BadRequest("Invalid template id")
    })?;
    Ok(id)
}

pub fn list_filter(params: &HashMap<String, String>) -> ListTemplates {
    ListTemplates {
        page: positive(params, "page", DEFAULT_PAGE),
        limit: positive(params, "limit", DEFAULT_LIMIT),
        search: non_empty(params, "search"),
        sort_by: non_empty(params, "sortBy"),
        order_by: non_empty(params, "orderBy"),
    }
}

pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let filter = list_filter(&params);
    let templates = state
        .templates
        .list(&filter)
        .await
        .map_err(|_| ApiError::Internal("Failed to fetch templates"))?;
    Ok(Json(templates))
}

pub async fn get_template(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Template>, ApiError> {
    let id = template_id(id)?;
    let template = state
        .templates
        .get_by_id(&id)
        .await
        .map_err(|_| ApiError::Internal("Failed to fetch template"))?
        .ok_or(ApiError::NotFound("Template not found"))?;
    Ok(Json(template))
}

pub async fn create_template(
    State(state): State<AppState>,
    payload: Result<Json<CreateTemplate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!(error = %e, "create payload rejected");
        ApiError::BadRequest("Invalid template data")
    })?;
    let template = state
        .templates
        .create(&payload)
        .await
        .map_err(|_| ApiError::Internal("Failed to create template"))?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn update_template(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTemplate>, JsonRejection>,
) -> Result<Json<Template>, ApiError> {
    let id = template_id(id)?;
    let Json(payload) = payload.map_err(|e| {
        tracing::warn!(error = %e, id = %id, "update payload rejected");
        ApiError::BadRequest("Invalid template data")
    })?;
    let template = state
        .templates
        .update(&id, &payload.data)
        .await
        .map_err(|_| ApiError::Internal("Failed to update template"))?
        .ok_or(ApiError::NotFound("Template not found"))?;
    Ok(Json(template))
}

pub async fn delete_template(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = template_id(id)?;
    state
        .templates
        .delete(&id)
        .await
        .map_err(|_| ApiError::Internal("Failed to delete template"))?
        .ok_or(ApiError::NotFound("Template not found"))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn list_filter_defaults() {
        assert_eq!(list_filter(&params(&[])), ListTemplates::default());
    }

    #[test]
    fn list_filter_reads_query_keys() {
        let filter = list_filter(&params(&[
            ("page", "2"),
            ("limit", "5"),
            ("search", "inv"),
            ("sortBy", "name"),
            ("orderBy", "desc"),
        ]));
        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, 5);
        assert_eq!(filter.search.as_deref(), Some("inv"));
        assert_eq!(filter.sort_by.as_deref(), Some("name"));
        assert_eq!(filter.order_by.as_deref(), Some("desc"));
    }

    #[test]
    fn list_filter_is_lenient_with_numbers() {
        let filter = list_filter(&params(&[("page", "abc"), ("limit", "0"), ("search", "")]));
        assert_eq!(filter.page, DEFAULT_PAGE);
        assert_eq!(filter.limit, DEFAULT_LIMIT);
        assert!(filter.search.is_none());
    }
}
