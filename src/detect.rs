//! Input kind detection.
//!
//! Two kinds of JSON input are accepted: a layout document (top-level
//! `pages`) and a previously saved outline (top-level `sections`).

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::extract::{ExtractOptions, SectionExtractor};
use crate::model::{LayoutDocument, Outline};

/// Kind of a JSON input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Page/line/span layout from the layout layer
    Layout,
    /// Saved section outline
    Outline,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Layout => write!(f, "layout document"),
            InputKind::Outline => write!(f, "section outline"),
        }
    }
}

/// Detect the input kind from raw bytes.
///
/// # Returns
/// * `Ok(InputKind)` when the bytes are a JSON object with `sections` or `pages`
/// * `Err(Error::InvalidLayout)` when `pages` is present but not an array
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_input_kind(data: &[u8]) -> Result<InputKind> {
    let value: Value = serde_json::from_slice(data).map_err(|_| Error::UnknownFormat)?;
    kind_of(&value)
}

fn kind_of(value: &Value) -> Result<InputKind> {
    let Some(object) = value.as_object() else {
        return Err(Error::UnknownFormat);
    };

    if object.get("sections").is_some_and(Value::is_array) {
        return Ok(InputKind::Outline);
    }
    match object.get("pages") {
        Some(Value::Array(_)) => Ok(InputKind::Layout),
        Some(_) => Err(Error::InvalidLayout("\"pages\" must be an array".to_string())),
        None => Err(Error::UnknownFormat),
    }
}

/// Detect the input kind of a file.
pub fn detect_input_kind_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let data = std::fs::read(path)?;
    detect_input_kind(&data)
}

/// Load an outline from either kind of input.
///
/// Layout documents are extracted with `options`; saved outlines are read
/// as-is. Either way the returned outline has its hierarchy built.
pub fn load_outline<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Outline> {
    let data = std::fs::read(path)?;
    let value: Value = serde_json::from_slice(&data).map_err(|_| Error::UnknownFormat)?;

    let mut outline = match kind_of(&value)? {
        InputKind::Layout => {
            let doc: LayoutDocument = serde_json::from_value(value)?;
            SectionExtractor::new(&doc, options.clone()).extract()?
        }
        InputKind::Outline => serde_json::from_value(value)?,
    };

    outline.build_hierarchy()?;
    outline.validate()?;
    Ok(outline)
}
