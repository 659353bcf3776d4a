//! Contract document rendering
//!
//! Merges a stored template with a generation input record into a
//! paginated PDF. The walk is sequential and ordered: the template is
//! fetched from the store first, every clause is substituted and laid
//! out in document order, and only a fully laid-out document is emitted.
//! A failed render produces nothing.

pub mod error;
pub mod layout;
pub mod pdf;

pub use error::RenderError;
pub use layout::{layout_document, Align, FontStyle, Page, PageGeometry, PageItem};
pub use pdf::emit_pdf;

use contract_model::GenerationInput;
use contract_store::TemplateStore;
use tracing::debug;

/// A finished contract document.
#[derive(Debug, Clone)]
pub struct RenderedContract {
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Suggested download filename, derived from the employee name.
    pub filename: String,
}

/// Render a contract for `input` against the template it names.
///
/// The store lookup completes before any substitution or layout starts;
/// an unresolved template id aborts with
/// [`RenderError::TemplateNotFound`] and emits nothing.
pub async fn render_contract<S>(
    store: &S,
    input: &GenerationInput,
    geometry: &PageGeometry,
) -> Result<RenderedContract, RenderError>
where
    S: TemplateStore + ?Sized,
{
    let template = store
        .get(&input.template_id)
        .await?
        .ok_or_else(|| RenderError::TemplateNotFound(input.template_id.clone()))?;

    let pages = layout_document(&template, input, geometry);
    let bytes = emit_pdf(&pages, geometry)?;
    debug!(
        template = %template.id,
        pages = pages.len(),
        "contract rendered"
    );

    Ok(RenderedContract {
        page_count: pages.len(),
        filename: output_filename(&input.employee_name),
        bytes,
    })
}

/// Download filename for a generated contract: whitespace runs in the
/// employee name collapse to single underscores.
pub fn output_filename(employee_name: &str) -> String {
    let name = employee_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{name}_contract.pdf")
}
