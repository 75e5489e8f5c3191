//! The outline: an ordered section list plus its hierarchy.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Section;
use crate::error::{Error, Result};
use crate::extract::hierarchy;

/// Default breadcrumb separator.
pub const DEFAULT_SEPARATOR: &str = " -> ";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Ordered sections of one document, as persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outline {
    /// Document title, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// When the section list was extracted
    pub generated_at: DateTime<Utc>,

    /// Breadcrumb separator
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Whether hierarchy reconstruction has already run
    #[serde(default)]
    pub hierarchy_built: bool,

    /// Sections sorted by sequence
    pub sections: Vec<Section>,
}

impl Outline {
    /// Wrap a freshly extracted section list. The hierarchy is not built yet.
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            title: None,
            generated_at: Utc::now(),
            separator: default_separator(),
            hierarchy_built: false,
            sections,
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the breadcrumb separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the outline holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Reconstruct the hierarchy unless a previous run already did.
    ///
    /// Returns `true` when reconstruction ran. An empty outline is marked
    /// built without running it.
    pub fn build_hierarchy(&mut self) -> Result<bool> {
        if self.hierarchy_built {
            log::debug!("hierarchy already built, skipping reconstruction");
            return Ok(false);
        }
        if self.sections.is_empty() {
            self.hierarchy_built = true;
            return Ok(false);
        }
        self.check_order()?;
        hierarchy::reconstruct(&mut self.sections, &self.separator);
        self.hierarchy_built = true;
        Ok(true)
    }

    /// Find a section by sequence number.
    pub fn get(&self, sequence: u32) -> Option<&Section> {
        self.sections
            .binary_search_by_key(&sequence, |s| s.sequence)
            .ok()
            .map(|i| &self.sections[i])
    }

    /// Sections without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.parent.is_none())
    }

    /// Build the parent/children index. Requires the hierarchy.
    pub fn index(&self) -> Result<SectionIndex> {
        if !self.hierarchy_built {
            return Err(Error::HierarchyNotBuilt);
        }
        Ok(SectionIndex::build(&self.sections))
    }

    /// Ancestors and children of one section.
    pub fn context(&self, sequence: u32) -> Result<SectionContext<'_>> {
        self.index()?.context(self, sequence)
    }

    /// Find a section by its full breadcrumb.
    pub fn find_by_breadcrumb(&self, breadcrumb: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.breadcrumb.as_deref() == Some(breadcrumb))
    }

    /// One line per section: heading, breadcrumb, enrichment and page, no body.
    pub fn digests(&self) -> Vec<SectionDigest<'_>> {
        self.sections
            .iter()
            .map(|s| SectionDigest {
                heading: s.display_heading(),
                breadcrumb: s.breadcrumb.as_deref(),
                summary: s.summary.as_deref(),
                classification: s.classification.as_deref(),
                page: s.page,
            })
            .collect()
    }

    /// Breadcrumb and classification of every section.
    pub fn entries(&self) -> Vec<OutlineEntry<'_>> {
        self.sections
            .iter()
            .map(|s| OutlineEntry {
                breadcrumb: s.breadcrumb.as_deref().unwrap_or(&s.heading),
                classification: s.classification.as_deref(),
            })
            .collect()
    }

    /// Check every structural invariant of the section list.
    pub fn validate(&self) -> Result<()> {
        self.check_order()?;

        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 && section.heading.trim().is_empty() {
                return Err(Error::Invariant(format!(
                    "section {} has an empty heading",
                    section.sequence
                )));
            }

            if !self.hierarchy_built {
                continue;
            }

            if section.path.last() != Some(&section.heading) {
                return Err(Error::Invariant(format!(
                    "path of section {} does not end with its heading",
                    section.sequence
                )));
            }
            let expected = section.path.join(&self.separator);
            if section.breadcrumb.as_deref() != Some(expected.as_str()) {
                return Err(Error::Invariant(format!(
                    "breadcrumb of section {} does not match its path",
                    section.sequence
                )));
            }
        }

        Ok(())
    }

    fn check_order(&self) -> Result<()> {
        for pair in self.sections.windows(2) {
            if pair[1].sequence <= pair[0].sequence {
                return Err(Error::Invariant(format!(
                    "sequence {} follows {}",
                    pair[1].sequence, pair[0].sequence
                )));
            }
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved outline.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the outline to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a saved outline from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

/// Body-free view of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDigest<'a> {
    /// Heading, corrected when enrichment supplied one
    pub heading: &'a str,
    /// Full breadcrumb; absent before the hierarchy is built
    pub breadcrumb: Option<&'a str>,
    /// Enrichment summary
    pub summary: Option<&'a str>,
    /// Enrichment classification
    pub classification: Option<&'a str>,
    /// Page of the heading
    pub page: u32,
}

/// Table-of-contents view of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry<'a> {
    /// Full breadcrumb, or the bare heading before the hierarchy is built
    pub breadcrumb: &'a str,
    /// Enrichment classification
    pub classification: Option<&'a str>,
}

/// Parent/children lookup built once after reconstruction.
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    positions: HashMap<u32, usize>,
    children: BTreeMap<u32, Vec<u32>>,
    roots: Vec<u32>,
}

impl SectionIndex {
    fn build(sections: &[Section]) -> Self {
        let mut index = SectionIndex::default();
        for (pos, section) in sections.iter().enumerate() {
            index.positions.insert(section.sequence, pos);
            match section.parent {
                Some(parent) => index
                    .children
                    .entry(parent)
                    .or_default()
                    .push(section.sequence),
                None => index.roots.push(section.sequence),
            }
        }
        index
    }

    /// Sequence numbers of root sections, in document order.
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// Sequence numbers of the direct children of `sequence`, in document order.
    pub fn children(&self, sequence: u32) -> &[u32] {
        self.children
            .get(&sequence)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Position of a section in the outline's list.
    pub fn position(&self, sequence: u32) -> Option<usize> {
        self.positions.get(&sequence).copied()
    }

    /// Resolve ancestors and children of `sequence` against `outline`.
    pub fn context<'a>(&self, outline: &'a Outline, sequence: u32) -> Result<SectionContext<'a>> {
        let lookup = |seq: u32| {
            self.position(seq)
                .map(|pos| &outline.sections[pos])
                .ok_or(Error::SectionNotFound(seq))
        };

        let section = lookup(sequence)?;

        let mut ancestors = Vec::new();
        let mut cursor = section.parent;
        while let Some(parent) = cursor {
            let p = lookup(parent)?;
            ancestors.push(p);
            cursor = p.parent;
        }
        ancestors.reverse();

        let children = self
            .children(sequence)
            .iter()
            .map(|&c| lookup(c))
            .collect::<Result<Vec<_>>>()?;

        Ok(SectionContext {
            section,
            ancestors,
            children,
        })
    }
}

/// A section together with its ancestors and direct children.
#[derive(Debug, Clone)]
pub struct SectionContext<'a> {
    /// The section itself
    pub section: &'a Section,
    /// Ancestors, root first
    pub ancestors: Vec<&'a Section>,
    /// Direct children in document order
    pub children: Vec<&'a Section>,
}

impl SectionContext<'_> {
    /// Heading of the direct parent, if any.
    pub fn parent_heading(&self) -> Option<&str> {
        self.ancestors.last().map(|s| s.heading.as_str())
    }
}
