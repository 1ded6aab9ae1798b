//! Template operations over a [`TemplateStore`].
//!
//! Outcomes are tagged: `Ok(Some(_))` found, `Ok(None)` not found, `Err(_)` fault.

use crate::error::{ServiceError, StoreError};
use crate::model::{CreateTemplate, ListTemplates, Template, TemplateChanges, TemplateQuery};
use crate::store::TemplateStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Persist a new template. The store rejecting the write is a create fault.
    pub async fn create(&self, payload: &CreateTemplate) -> Result<Template, ServiceError> {
        let template = self.store.insert(payload).await.map_err(|e| {
            tracing::error!(error = %e, "create template");
            ServiceError::Create(e)
        })?;
        tracing::info!(id = %template.id, "template created");
        Ok(template)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Template>, ServiceError> {
        self.store.find_by_id(id).await.map_err(|e| {
            tracing::error!(error = %e, id = %id, "fetch template");
            ServiceError::Fetch(e)
        })
    }

    /// One page of templates. An empty page is a normal result, not absence.
    pub async fn list(&self, filter: &ListTemplates) -> Result<Vec<Template>, ServiceError> {
        let query = TemplateQuery::from_list(filter).map_err(|e| {
            tracing::error!(error = %e, "list templates");
            ServiceError::Fetch(e)
        })?;
        self.store.find_many(&query).await.map_err(|e| {
            tracing::error!(error = %e, "list templates");
            ServiceError::Fetch(e)
        })
    }

    pub async fn update(&self, id: &str, changes: &TemplateChanges) -> Result<Option<Template>, ServiceError> {
        let updated = self.store.update(id, changes).await.map_err(|e| {
            tracing::error!(error = %e, id = %id, "update template");
            ServiceError::Update(e)
        })?;
        if updated.is_some() {
            tracing::info!(id = %id, "template updated");
        }
        Ok(updated)
    }

    /// Hard delete. Returns the template as it was before removal.
    pub async fn delete(&self, id: &str) -> Result<Option<Template>, ServiceError> {
        let deleted = self.store.delete(id).await.map_err(|e| {
            tracing::error!(error = %e, id = %id, "delete template");
            ServiceError::Delete(e)
        })?;
        if deleted.is_some() {
            tracing::info!(id = %id, "template deleted");
        }
        Ok(deleted)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
