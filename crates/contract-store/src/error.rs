//! Error types for template persistence

use thiserror::Error;

/// Failures surfaced by a template store.
///
/// The store fails fast: no internal retry, and a failed write leaves
/// the previously stored state intact.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored template data is not valid: {0}")]
    Corrupt(#[from] serde_json::Error),
}
