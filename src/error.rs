//! Error types for word-pager.

use crate::layout::font::FontId;
use thiserror::Error;

/// Result type alias for word-pager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the bundled line breaker and the JSON bridge.
///
/// The layout engine itself never fails on its own; it only forwards the
/// line breaker's error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Neither the requested font nor the document default font is loaded.
    #[error("Font {0:?} is not loaded and no default font is available")]
    MissingFont(FontId),

    /// Document or options JSON could not be decoded, or output encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
