//! Section types.

use serde::{Deserialize, Serialize};

use super::Attributes;

/// A labeled section: a heading plus the body text that follows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub heading: String,

    /// Headings from the root down to this section, inclusive
    #[serde(default)]
    pub path: Vec<String>,

    /// `path` joined with the outline separator; absent before the hierarchy is built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<String>,

    /// Sequence number of the parent section, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,

    /// Style-derived attributes of the heading
    pub attributes: Attributes,

    /// Accumulated body text
    #[serde(default)]
    pub body: String,

    /// Creation order; stable sort key
    pub sequence: u32,

    /// Page of the heading (1-indexed)
    pub page: u32,

    /// Spelling-corrected heading from the enrichment service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_heading: Option<String>,

    /// Short summary from the enrichment service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Classification label from the enrichment service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    /// Key entities from the enrichment service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_entities: Option<Vec<String>>,
}

impl Section {
    /// Create a new section with an empty body.
    pub fn new(heading: impl Into<String>, attributes: Attributes, sequence: u32) -> Self {
        let page = attributes.page;
        Self {
            heading: heading.into(),
            path: Vec::new(),
            breadcrumb: None,
            parent: None,
            attributes,
            body: String::new(),
            sequence,
            page,
            corrected_heading: None,
            summary: None,
            classification: None,
            key_entities: None,
        }
    }

    /// Append a piece of body text, one space after whatever came before.
    pub fn append_body(&mut self, text: &str) {
        if !self.body.is_empty() {
            self.body.push(' ');
        }
        self.body.push_str(text);
    }

    /// Whether the body holds nothing but whitespace.
    pub fn has_empty_body(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Depth in the hierarchy (1 for roots, 0 before reconstruction).
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The heading to display: the corrected one when enrichment supplied it.
    pub fn display_heading(&self) -> &str {
        self.corrected_heading.as_deref().unwrap_or(&self.heading)
    }

    /// Whether any enrichment field is populated.
    pub fn is_enriched(&self) -> bool {
        self.summary.is_some() || self.classification.is_some() || self.key_entities.is_some()
    }
}
