//! Error types for contract rendering

use contract_store::StoreError;
use thiserror::Error;

/// Failures surfaced while producing a contract document.
///
/// A failed render emits nothing: the caller never receives partial
/// pages or a truncated file.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The requested template id does not resolve in the store.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template store failed: {0}")]
    Store(#[from] StoreError),

    #[error("document emission failed: {0}")]
    Emit(String),
}
