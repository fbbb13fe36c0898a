//! Word-Pager: pagination and layout for word-processor documents
//!
//! This crate turns a parsed document model into pages:
//! - Greedy line breaking with pluggable measurement ([`LineBreaker`])
//! - Paragraph splitting across pages and columns, keep-with-next and
//!   keep-lines-together
//! - Section breaks (next page and continuous) and multi-column sections
//! - Header and footer selection per page (first, even, default)
//!
//! Layout is a pure function of its inputs: [`layout`] never mutates the
//! document and always returns the same pages for the same input.

pub mod document;
pub mod error;
pub mod layout;
pub mod units;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPaginator;

// Re-export primary types
pub use document::{Block, Document, Paragraph, Section, SectionProperties, Table};
pub use error::{Error, Result};
pub use layout::{
    layout, GreedyLineBreaker, LayoutOptions, LineBreaker, Page, PageLayoutResult,
    PositionedContent,
};

/// Lay out a JSON document with JSON options using the bundled line breaker.
///
/// Returns the page list as JSON.
pub fn layout_json(document_json: &str, options_json: &str) -> Result<String> {
    let document = Document::from_json(document_json)?;
    let options = if options_json.trim().is_empty() {
        LayoutOptions::default()
    } else {
        LayoutOptions::from_json(options_json)?
    };
    layout(&document, &options, &GreedyLineBreaker::new())?.to_json()
}
