//! Template persistence
//!
//! The store is the sole source of truth for templates. It hands out
//! owned values: an editor's working copy stays detached until an
//! explicit `save`, and concurrent saves of the same id follow
//! last-write-wins with no merge.
//!
//! Two backends implement the [`TemplateStore`] capability:
//! - [`JsonFileStore`], a single JSON document on disk with atomic
//!   replace-on-write
//! - [`MemoryStore`], a volatile fake for tests and one-shot callers

pub mod defaults;
pub mod error;
pub mod file;
pub mod memory;

pub use defaults::default_templates;
pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use contract_model::Template;

/// Capability for loading and saving templates.
///
/// All operations are asynchronous and safe to call repeatedly. `save`
/// upserts by template id and is idempotent: saving identical content
/// twice yields the same stored state.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// All stored templates, in stored order.
    async fn list(&self) -> Result<Vec<Template>, StoreError>;

    /// The template with this id, or `None` when absent.
    async fn get(&self, id: &str) -> Result<Option<Template>, StoreError>;

    /// Insert the template, or replace the stored one with the same id.
    async fn save(&self, template: &Template) -> Result<(), StoreError>;

    /// Remove the template with this id. Removing an absent id succeeds.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
