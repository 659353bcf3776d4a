//! PDF emission
//!
//! Turns laid-out pages into a PDF document: one content stream per
//! page, built from raw text and path operators, with the built-in
//! Type1 Helvetica faces as the only font resources. Layout positions
//! are millimetres from the top-left corner; PDF space is points from
//! the bottom-left, so emission converts and flips the vertical axis.

use crate::error::RenderError;
use crate::layout::{Align, FontStyle, Page, PageGeometry, PageItem};
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::debug;

const MM_TO_PT: f64 = 72.0 / 25.4;
const PT_TO_MM: f64 = 25.4 / 72.0;

/// Serialize laid-out pages as PDF bytes.
pub fn emit_pdf(pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>, RenderError> {
    let width_pt = geometry.page_width * MM_TO_PT;
    let height_pt = geometry.page_height * MM_TO_PT;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut regular = Dictionary::new();
    regular.set("Type", Object::Name(b"Font".to_vec()));
    regular.set("Subtype", Object::Name(b"Type1".to_vec()));
    regular.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    let regular_id = doc.add_object(Object::Dictionary(regular));

    let mut bold = Dictionary::new();
    bold.set("Type", Object::Name(b"Font".to_vec()));
    bold.set("Subtype", Object::Name(b"Type1".to_vec()));
    bold.set("BaseFont", Object::Name(b"Helvetica-Bold".to_vec()));
    let bold_id = doc.add_object(Object::Dictionary(bold));

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(regular_id));
    fonts.set("F2", Object::Reference(bold_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, height_pt);
        let content_id = doc.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            content.into_bytes(),
        )));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        page_dict.set("Contents", Object::Reference(content_id));
        let page_id = doc.add_object(Object::Dictionary(page_dict));
        kids.push(Object::Reference(page_id));
    }

    let mut pages_dict = Dictionary::new();
    pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
    pages_dict.set("Count", Object::Integer(pages.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));
    pages_dict.set("Resources", Object::Dictionary(resources));
    pages_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt as f32),
            Object::Real(height_pt as f32),
        ]),
    );
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| RenderError::Emit(err.to_string()))?;
    debug!(pages = pages.len(), bytes = bytes.len(), "document emitted");
    Ok(bytes)
}

/// Content stream for one page.
fn page_content(page: &Page, height_pt: f64) -> String {
    let mut ops = String::new();
    for item in &page.items {
        match item {
            PageItem::Text {
                x,
                y,
                size,
                style,
                align,
                text,
            } => {
                let font = match style {
                    FontStyle::Regular => "F1",
                    FontStyle::Bold => "F2",
                };
                let x_mm = match align {
                    Align::Left => *x,
                    Align::Center => x - text_width_mm(text, *size) / 2.0,
                };
                let tx = x_mm * MM_TO_PT;
                let ty = height_pt - y * MM_TO_PT;
                ops.push_str(&format!(
                    "BT\n/{font} {size} Tf\n{tx:.2} {ty:.2} Td\n({}) Tj\nET\n",
                    escape_pdf_string(text)
                ));
            }
            PageItem::Rule { x1, x2, y } => {
                let py = height_pt - y * MM_TO_PT;
                ops.push_str(&format!(
                    "{:.2} {py:.2} m {:.2} {py:.2} l S\n",
                    x1 * MM_TO_PT,
                    x2 * MM_TO_PT
                ));
            }
        }
    }
    ops
}

/// Approximate width of a run of text, for centering. Helvetica averages
/// out near half the font size per character.
fn text_width_mm(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.5 * PT_TO_MM
}

/// Escape special characters for PDF string literals. The document only
/// carries WinAnsi-safe ASCII; anything else is replaced.
fn escape_pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
