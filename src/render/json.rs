//! JSON rendering for section outlines.
//!
//! Besides the full outline, two body-free projections are available: a
//! digest per section and a breadcrumb table of contents. Both are meant
//! for consumers that only need to pick a section before asking for it.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Outline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Which projection of the outline to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonView {
    /// The whole outline, loadable again with [`Outline::from_json`]
    #[default]
    Full,
    /// Heading, breadcrumb, summary, classification and page of each section
    Digest,
    /// Breadcrumb and classification of each section
    Entries,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    to_json_view(outline, JsonView::Full, format)
}

/// Convert one projection of an outline to JSON.
pub fn to_json_view(outline: &Outline, view: JsonView, format: JsonFormat) -> Result<String> {
    match view {
        JsonView::Full => serialize(outline, format),
        JsonView::Digest => serialize(&outline.digests(), format),
        JsonView::Entries => serialize(&outline.entries(), format),
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
