//! JSON file backed template store

use crate::defaults::default_templates;
use crate::{StoreError, TemplateStore};
use async_trait::async_trait;
use contract_model::Template;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key under which the template array lives inside the backing file.
const STORE_KEY: &str = "contractTemplates";

/// Template store persisted as a single JSON document on disk.
///
/// The file holds an object whose `contractTemplates` member is the
/// template array; other members are carried through untouched. On first
/// access a missing file or missing member is seeded with the built-in
/// default set. Seeding never overwrites existing data.
///
/// Writes serialize the full document to a sibling temp file and then
/// rename it over the original, so an interrupted save leaves the
/// previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The backing document, or `None` when the file does not exist yet.
    async fn read_document(&self) -> Result<Option<Map<String, Value>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_document(
        &self,
        mut document: Map<String, Value>,
        templates: &[Template],
    ) -> Result<(), StoreError> {
        document.insert(STORE_KEY.to_string(), serde_json::to_value(templates)?);
        let bytes = serde_json::to_vec_pretty(&Value::Object(document))?;

        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "template store written");
        Ok(())
    }

    /// Current templates, seeding the default set when the collection is
    /// absent.
    async fn read_all(&self) -> Result<Vec<Template>, StoreError> {
        let mut document = self.read_document().await?.unwrap_or_default();
        match document.remove(STORE_KEY) {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => {
                let templates = default_templates();
                info!(
                    path = %self.path.display(),
                    count = templates.len(),
                    "seeding template store with built-in defaults"
                );
                self.write_document(document, &templates).await?;
                Ok(templates)
            }
        }
    }
}

#[async_trait]
impl TemplateStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Template>, StoreError> {
        self.read_all().await
    }

    async fn get(&self, id: &str) -> Result<Option<Template>, StoreError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .find(|template| template.id == id))
    }

    async fn save(&self, template: &Template) -> Result<(), StoreError> {
        let mut document = self.read_document().await?.unwrap_or_default();
        let mut templates: Vec<Template> = match document.remove(STORE_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => default_templates(),
        };
        match templates.iter_mut().find(|stored| stored.id == template.id) {
            Some(stored) => *stored = template.clone(),
            None => templates.push(template.clone()),
        }
        self.write_document(document, &templates).await?;
        debug!(id = %template.id, "template saved");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut document = self.read_document().await?.unwrap_or_default();
        let mut templates: Vec<Template> = match document.remove(STORE_KEY) {
            Some(value) => serde_json::from_value(value)?,
            None => default_templates(),
        };
        templates.retain(|template| template.id != id);
        self.write_document(document, &templates).await?;
        debug!(id, "template deleted");
        Ok(())
    }
}
