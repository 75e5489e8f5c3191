//! Error types for sectionize library.

use std::io;
use thiserror::Error;

/// Result type alias for sectionize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during section extraction.
///
/// Conditions the engine recovers from on its own (malformed spans, style
/// lookup misses, hierarchy underflow) never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is neither a layout document nor a saved outline.
    #[error("Unknown input format: expected a layout document or a saved outline")]
    UnknownFormat,

    /// The layout document is structurally unusable.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// An engine invariant was broken.
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// The operation needs the section hierarchy, which has not been built.
    #[error("Section hierarchy has not been built")]
    HierarchyNotBuilt,

    /// No section carries the requested sequence number.
    #[error("Section {0} not found")]
    SectionNotFound(u32),

    /// The enrichment collaborator failed or returned an unusable reply.
    #[error("Enrichment error: {0}")]
    Enrichment(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
