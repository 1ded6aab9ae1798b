//! In-process template store. Used when no database is configured and in tests.

use crate::error::StoreError;
use crate::model::{CreateTemplate, SortField, SortOrder, Template, TemplateChanges, TemplateQuery};
use crate::store::TemplateStore;
use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Rows are kept in insertion order so equal sort keys page deterministically.
#[derive(Clone, Default)]
pub struct MemoryTemplateStore {
    rows: Arc<RwLock<Vec<Template>>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

fn compare(a: &Template, b: &Template, sort: SortField) -> Ordering {
    match sort {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Content => a.content.cmp(&b.content),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn insert(&self, new: &CreateTemplate) -> Result<Template, StoreError> {
        let now = Utc::now();
        let template = Template {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name.clone(),
            content: new.content.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(template.clone());
        Ok(template)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|t| t.id == id).cloned())
    }

    async fn find_many(&self, query: &TemplateQuery) -> Result<Vec<Template>, StoreError> {
        let rows = self.rows.read().await;
        let mut matched: Vec<&Template> = rows
            .iter()
            .filter(|t| match &query.search {
                Some(s) => t.name.contains(s.as_str()),
                None => true,
            })
            .collect();
        matched.sort_by(|a, b| {
            let ord = compare(a, b, query.sort);
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, changes: &TemplateChanges) -> Result<Option<Template>, StoreError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            row.name = name.clone();
        }
        if let Some(content) = &changes.content {
            row.content = content.clone();
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows
            .iter()
            .position(|t| t.id == id)
            .map(|idx| rows.remove(idx)))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(name: &str) -> CreateTemplate {
        CreateTemplate {
            name: name.into(),
            content: format!("{} body", name),
        }
    }

    fn page(offset: u64, limit: u32, search: Option<&str>, sort: SortField, order: SortOrder) -> TemplateQuery {
        TemplateQuery {
            offset,
            limit,
            search: search.map(String::from),
            sort,
            order,
        }
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryTemplateStore::new();
        let a = store.insert(&new("a")).await.unwrap();
        let b = store.insert(&new("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn find_many_filters_sorts_and_pages() {
        let store = MemoryTemplateStore::new();
        for name in ["invoice-b", "receipt", "invoice-a", "invoice-c"] {
            store.insert(&new(name)).await.unwrap();
        }

        let rows = store
            .find_many(&page(0, 10, Some("invoice"), SortField::Name, SortOrder::Desc))
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["invoice-c", "invoice-b", "invoice-a"]);

        let rows = store
            .find_many(&page(1, 2, Some("invoice"), SortField::Name, SortOrder::Asc))
            .await
            .unwrap();
        let names: Vec<&str> = rows.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["invoice-b", "invoice-c"]);
    }

    #[tokio::test]
    async fn search_is_case_sensitive() {
        let store = MemoryTemplateStore::new();
        store.insert(&new("Invoice")).await.unwrap();
        let rows = store
            .find_many(&page(0, 10, Some("invoice"), SortField::CreatedAt, SortOrder::Asc))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let store = MemoryTemplateStore::new();
        let t = store.insert(&new("a")).await.unwrap();
        let updated = store
            .update(
                &t.id,
                &TemplateChanges {
                    name: Some("renamed".into()),
                    content: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.content, t.content);
        assert_eq!(updated.created_at, t.created_at);
        assert!(store.update("missing", &TemplateChanges::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_returns_prior_state_once() {
        let store = MemoryTemplateStore::new();
        let t = store.insert(&new("a")).await.unwrap();
        assert_eq!(store.delete(&t.id).await.unwrap(), Some(t.clone()));
        assert!(store.delete(&t.id).await.unwrap().is_none());
        assert!(store.find_by_id(&t.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
