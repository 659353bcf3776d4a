//! In-memory template store

use crate::defaults::default_templates;
use crate::{StoreError, TemplateStore};
use async_trait::async_trait;
use contract_model::Template;
use tokio::sync::Mutex;

/// Volatile store holding templates in memory.
///
/// Implements the same capability as the file-backed store, which makes
/// it the drop-in fake for tests and for callers that do not want disk
/// persistence. Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: Mutex<Vec<Template>>,
}

impl MemoryStore {
    /// An empty store. Nothing is seeded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with the built-in default template set.
    pub fn with_defaults() -> Self {
        Self {
            templates: Mutex::new(default_templates()),
        }
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        Ok(self.templates.lock().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Template>, StoreError> {
        Ok(self
            .templates
            .lock()
            .await
            .iter()
            .find(|template| template.id == id)
            .cloned())
    }

    async fn save(&self, template: &Template) -> Result<(), StoreError> {
        let mut templates = self.templates.lock().await;
        match templates.iter_mut().find(|stored| stored.id == template.id) {
            Some(stored) => *stored = template.clone(),
            None => templates.push(template.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.templates
            .lock()
            .await
            .retain(|template| template.id != id);
        Ok(())
    }
}
