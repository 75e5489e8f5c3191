//! # sectionize
//!
//! Labeled section extraction for long-form documents.
//!
//! This library takes the page/line/span layout of a document (as produced
//! by a PDF layout library) and splits it into headed sections with a
//! breadcrumb hierarchy, using only visual style: font size, weight, case,
//! alignment and indentation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sectionize::{extract_file, render};
//!
//! fn main() -> sectionize::Result<()> {
//!     // Extract sections from a layout JSON file
//!     let outline = extract_file("booklet.layout.json")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&outline, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Style profiling**: a per-document catalog of every visual style
//! - **Running line removal**: repeated headers and footers are dropped
//! - **Hierarchy reconstruction**: breadcrumbs without numbered heading levels
//! - **Enrichment boundary**: summaries and classifications from an external service
//! - **Multiple output formats**: JSON, Markdown, indented tree

pub mod detect;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_input_kind, detect_input_kind_from_path, load_outline, InputKind};
pub use enrich::{
    enrich_outline, EnrichOptions, EnrichReport, Enricher, Enrichment, JsonEnricher, SectionClass,
    DEFAULT_SUMMARY_WORDS,
};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, SectionExtractor, StyleCatalog};
pub use model::{
    Alignment, Attributes, FontSize, FormatTag, LayoutDocument, Outline, OutlineEntry, Page,
    Section, SectionContext, SectionDigest, SectionIndex, Span, Style, StyleKey,
};
pub use render::{JsonFormat, JsonView, RenderOptions};

use std::path::Path;

/// Extract sections from a layout document with default options.
///
/// # Example
///
/// ```no_run
/// use sectionize::{extract, LayoutDocument};
///
/// let doc = LayoutDocument::open("booklet.layout.json").unwrap();
/// let outline = extract(&doc).unwrap();
/// println!("Sections: {}", outline.len());
/// ```
pub fn extract(doc: &LayoutDocument) -> Result<Outline> {
    extract_with_options(doc, ExtractOptions::default())
}

/// Extract sections from a layout document with custom options.
///
/// # Example
///
/// ```no_run
/// use sectionize::{extract_with_options, ExtractOptions, LayoutDocument};
///
/// let doc = LayoutDocument::open("booklet.layout.json").unwrap();
/// let options = ExtractOptions::new()
///     .with_separator(" / ")
///     .with_override_title("Plan Highlights");
/// let outline = extract_with_options(&doc, options).unwrap();
/// ```
pub fn extract_with_options(doc: &LayoutDocument, options: ExtractOptions) -> Result<Outline> {
    SectionExtractor::new(doc, options).extract()
}

/// Extract sections from a layout JSON file.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let doc = LayoutDocument::open(path)?;
    extract(&doc)
}

/// Extract sections from layout JSON text.
pub fn extract_str(json: &str) -> Result<Outline> {
    let doc = LayoutDocument::from_json_str(json)?;
    extract(&doc)
}

/// Convert a layout document or saved outline file to Markdown.
///
/// # Example
///
/// ```no_run
/// use sectionize::to_markdown;
///
/// let markdown = to_markdown("booklet.layout.json").unwrap();
/// std::fs::write("booklet.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let outline = load_outline(path, &ExtractOptions::default())?;
    render::to_markdown(&outline, &RenderOptions::default())
}

/// Convert a layout document or saved outline file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = load_outline(path, &ExtractOptions::default())?;
    render::to_json(&outline, format)
}

/// Builder for extracting and rendering outlines.
///
/// # Example
///
/// ```no_run
/// use sectionize::Sectionize;
///
/// let markdown = Sectionize::new()
///     .with_separator(" > ")
///     .with_frontmatter()
///     .with_max_depth(2)
///     .load("booklet.layout.json")?
///     .to_markdown()?;
/// # Ok::<(), sectionize::Error>(())
/// ```
pub struct Sectionize {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Sectionize {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set the breadcrumb separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_separator(separator);
        self
    }

    /// Accept an extra exact title as a heading.
    pub fn with_override_title(mut self, title: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_override_title(title);
        self
    }

    /// Set how often a heading style must repeat.
    pub fn with_heading_repetition(mut self, pages: usize, occurrences: usize) -> Self {
        self.extract_options = self.extract_options.with_heading_repetition(pages, occurrences);
        self
    }

    /// Skip hierarchy reconstruction for layout input.
    pub fn flat(mut self) -> Self {
        self.extract_options = self.extract_options.flat();
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Leave section bodies out of Markdown output.
    pub fn without_body(mut self) -> Self {
        self.render_options = self.render_options.with_body(false);
        self
    }

    /// Limit Markdown output depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.render_options = self.render_options.with_max_depth(depth);
        self
    }

    /// Extract sections from an in-memory layout document.
    pub fn extract(self, doc: &LayoutDocument) -> Result<SectionizeResult> {
        let outline = SectionExtractor::new(doc, self.extract_options).extract()?;
        Ok(SectionizeResult {
            outline,
            render_options: self.render_options,
        })
    }

    /// Load a layout document or a saved outline.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<SectionizeResult> {
        let outline = load_outline(path, &self.extract_options)?;
        Ok(SectionizeResult {
            outline,
            render_options: self.render_options,
        })
    }
}

impl Default for Sectionize {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting or loading an outline.
pub struct SectionizeResult {
    /// The extracted outline
    pub outline: Outline,
    /// Render options to use
    render_options: RenderOptions,
}

impl SectionizeResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.outline, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.outline, format)
    }

    /// Convert to an indented tree.
    pub fn to_tree(&self) -> String {
        render::to_tree(&self.outline)
    }

    /// Enrich every section through an external service.
    pub fn enrich(&mut self, enricher: &dyn Enricher, options: &EnrichOptions) -> Result<EnrichReport> {
        enrich_outline(&mut self.outline, enricher, options)
    }

    /// Save the outline as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.outline.save(path)
    }

    /// Get the outline.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }
}
