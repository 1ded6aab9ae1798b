//! Template entity and the typed payloads each service operation consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub content: String,
}

/// Fields to change on update; `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Wire shape of the update body: `{ "data": { "name"?, "content"? } }`.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateTemplate {
    pub data: TemplateChanges,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;

/// List payload as parsed from the query string; sort keys are resolved by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListTemplates {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order_by: Option<String>,
}

impl Default for ListTemplates {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
            sort_by: None,
            order_by: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Content,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Accepts the camelCase field names used on the wire.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "content" => Ok(SortField::Content),
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            other => Err(StoreError::UnknownSortField(other.to_string())),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Content => "content",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(StoreError::UnknownSortOrder(other.to_string())),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolved list query handed to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateQuery {
    pub offset: u64,
    pub limit: u32,
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl TemplateQuery {
    pub fn from_list(payload: &ListTemplates) -> Result<Self, StoreError> {
        let page = payload.page.max(1);
        let limit = payload.limit.clamp(1, MAX_LIMIT);
        let sort = match payload.sort_by.as_deref() {
            Some(s) => SortField::parse(s)?,
            None => SortField::default(),
        };
        let order = match payload.order_by.as_deref() {
            Some(s) => SortOrder::parse(s)?,
            None => SortOrder::default(),
        };
        Ok(Self {
            offset: u64::from(page - 1) * u64::from(limit),
            limit,
            search: payload.search.clone().filter(|s| !s.is_empty()),
            sort,
            order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_skips_previous_pages() {
        let q = TemplateQuery::from_list(&ListTemplates {
            page: 2,
            limit: 5,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(q.offset, 5);
        assert_eq!(q.limit, 5);
        assert_eq!(q.sort, SortField::CreatedAt);
        assert_eq!(q.order, SortOrder::Asc);
    }

    #[test]
    fn limit_is_capped_and_page_floored() {
        let q = TemplateQuery::from_list(&ListTemplates {
            page: 0,
            limit: 50_000,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(q.offset, 0);
        assert_eq!(q.limit, MAX_LIMIT);
    }

    #[test]
    fn unknown_sort_keys_are_rejected() {
        let bad_field = ListTemplates {
            sort_by: Some("password".into()),
            ..Default::default()
        };
        assert!(matches!(
            TemplateQuery::from_list(&bad_field),
            Err(StoreError::UnknownSortField(f)) if f == "password"
        ));
        let bad_order = ListTemplates {
            order_by: Some("sideways".into()),
            ..Default::default()
        };
        assert!(matches!(
            TemplateQuery::from_list(&bad_order),
            Err(StoreError::UnknownSortOrder(_))
        ));
    }

    #[test]
    fn template_serializes_camel_case() {
        let now = Utc::now();
        let t = Template {
            id: "t1".into(),
            name: "Welcome".into(),
            content: "Hello".into(),
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&t).unwrap();
        assert!(v.get("createdAt").is_some());
        assert!(v.get("updatedAt").is_some());
        assert!(v.get("created_at").is_none());
    }
}
