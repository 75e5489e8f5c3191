//! Layout input types: pages, blocks, lines and spans.
//!
//! These mirror what a PDF layout library hands over: every span carries its
//! text, bounding box, font size, font name and a style-flag bitmask. Each
//! page also carries its own font table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A laid-out document, as produced by the external layout layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Document title, if the layout layer knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Pages in reading order
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl LayoutDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a layout document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a layout document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a layout document from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over every span in the document.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.pages.iter().flat_map(|p| p.lines()).flat_map(|l| l.spans.iter())
    }
}

/// A single page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed); 0 means "use the page's position"
    #[serde(default)]
    pub number: u32,

    /// Text blocks in the layout engine's reading order
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Font table keyed by font name
    #[serde(default)]
    pub fonts: HashMap<String, FontInfo>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a single-line block holding the given spans.
    pub fn add_line(&mut self, spans: Vec<Span>) {
        self.blocks.push(Block {
            lines: vec![Line { spans }],
        });
    }

    /// Register a font in the page's font table.
    pub fn add_font(&mut self, name: impl Into<String>, info: FontInfo) {
        self.fonts.insert(name.into(), info);
    }

    /// Iterate over the page's lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// Whether the page's font table marks `font` as an all-caps font.
    pub fn is_all_caps_font(&self, font: &str) -> bool {
        self.fonts.get(font).is_some_and(|f| f.all_caps)
    }
}

/// A block of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// A visual line of spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Spans that carry usable text and geometry.
    pub fn well_formed_spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(|s| s.is_well_formed())
    }
}

/// Font style flag: bold.
pub const FLAG_BOLD: u32 = 2;
/// Font style flag: italic.
pub const FLAG_ITALIC: u32 = 4;
/// Font style flag: underline.
pub const FLAG_UNDERLINE: u32 = 8;
/// Font style flag: bold (alternate bit used by some producers).
pub const FLAG_BOLD_ALT: u32 = 16;

/// A run of identically styled text on one line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    #[serde(default)]
    pub text: String,

    /// Bounding box as (left, top, right, bottom)
    #[serde(default)]
    pub bbox: [f32; 4],

    /// Font size in points
    #[serde(default)]
    pub size: f32,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: String,

    /// Style-flag bitmask
    #[serde(default)]
    pub flags: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, bbox: [f32; 4], size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox,
            size,
            font: font.into(),
            flags: 0,
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the span bold.
    pub fn bold(self) -> Self {
        let flags = self.flags | FLAG_BOLD;
        self.with_flags(flags)
    }

    /// Left edge.
    pub fn left(&self) -> f32 {
        self.bbox[0]
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.bbox[1]
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.bbox[2]
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.bbox[3]
    }

    /// Trimmed text content.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the span has text, a usable size and a sane bounding box.
    pub fn is_well_formed(&self) -> bool {
        !self.trimmed().is_empty()
            && self.size.is_finite()
            && self.size > 0.0
            && self.bbox.iter().all(|v| v.is_finite())
            && self.right() >= self.left()
    }

    /// Whether the span shares size, font and flags with `other`.
    pub fn same_face(&self, other: &Span) -> bool {
        self.size == other.size && self.font == other.font && self.flags == other.flags
    }
}

/// Font table entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontInfo {
    /// The font renders every glyph as a capital
    #[serde(default)]
    pub all_caps: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_well_formed() {
        let span = Span::new("Hello", [10.0, 10.0, 50.0, 20.0], 12.0, "Helvetica");
        assert!(span.is_well_formed());

        let empty = Span::new("   ", [10.0, 10.0, 50.0, 20.0], 12.0, "Helvetica");
        assert!(!empty.is_well_formed());

        let no_size = Span::new("Hello", [10.0, 10.0, 50.0, 20.0], 0.0, "Helvetica");
        assert!(!no_size.is_well_formed());

        let inverted = Span::new("Hello", [50.0, 10.0, 10.0, 20.0], 12.0, "Helvetica");
        assert!(!inverted.is_well_formed());
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let json = r#"{"pages": [{"blocks": [{"lines": [{"spans": [{"text": "x"}, {}]}, {}]}]}]}"#;
        let doc = LayoutDocument::from_json_str(json).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].number, 0);
        assert_eq!(doc.spans().count(), 2);
        assert_eq!(doc.spans().filter(|s| s.is_well_formed()).count(), 0);
    }

    #[test]
    fn test_font_table_lookup() {
        let mut page = Page::new(1);
        page.add_font("Caps-Regular", FontInfo { all_caps: true });
        assert!(page.is_all_caps_font("Caps-Regular"));
        assert!(!page.is_all_caps_font("Helvetica"));
    }

    #[test]
    fn test_same_face() {
        let a = Span::new("A", [0.0, 0.0, 5.0, 10.0], 12.0, "Helvetica").bold();
        let b = Span::new("B", [6.0, 0.0, 9.0, 10.0], 12.0, "Helvetica").bold();
        let c = Span::new("C", [6.0, 0.0, 9.0, 10.0], 12.0, "Helvetica");
        assert!(a.same_face(&b));
        assert!(!a.same_face(&c));
    }
}
