//! Extraction options and configuration.

use crate::model::DEFAULT_SEPARATOR;

/// Titles accepted as headings regardless of style.
pub const DEFAULT_OVERRIDE_TITLES: [&str; 5] = [
    "Summary of Benefits",
    "Table of Contents",
    "Schedule of Benefits",
    "Benefit Schedule",
    "Benefit Summary",
];

/// Options for section extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Lines inspected at the top and bottom of each page for running headers/footers
    pub edge_lines: usize,

    /// Tolerance used by the alignment rule, in layout units
    pub alignment_margin: f32,

    /// Vertical tolerance for matching running header/footer lines
    pub running_tolerance: f32,

    /// Width of an indentation bucket
    pub indent_bucket: i32,

    /// Distinct pages a heading style must appear on
    pub min_heading_pages: usize,

    /// Occurrences a heading style must have
    pub min_heading_occurrences: usize,

    /// Minimum heading length in characters
    pub min_heading_chars: usize,

    /// Sample texts kept per catalog entry
    pub sample_limit: usize,

    /// Exact titles always accepted as headings
    pub override_titles: Vec<String>,

    /// Breadcrumb separator
    pub separator: String,

    /// Heading of the synthetic leading section
    pub preamble_heading: String,

    /// Expand typographic ligatures (ﬁ, ﬂ, ...) in line text
    pub fix_ligatures: bool,

    /// Whether to reconstruct the hierarchy after extraction
    pub build_hierarchy: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of edge lines inspected per page.
    pub fn with_edge_lines(mut self, lines: usize) -> Self {
        self.edge_lines = lines;
        self
    }

    /// Set the alignment tolerance.
    pub fn with_alignment_margin(mut self, margin: f32) -> Self {
        self.alignment_margin = margin;
        self
    }

    /// Set the running header/footer vertical tolerance.
    pub fn with_running_tolerance(mut self, tolerance: f32) -> Self {
        self.running_tolerance = tolerance;
        self
    }

    /// Set the indentation bucket width.
    pub fn with_indent_bucket(mut self, bucket: i32) -> Self {
        self.indent_bucket = bucket.max(1);
        self
    }

    /// Set the repetition thresholds for heading styles.
    pub fn with_heading_repetition(mut self, pages: usize, occurrences: usize) -> Self {
        self.min_heading_pages = pages;
        self.min_heading_occurrences = occurrences;
        self
    }

    /// Set the minimum heading length.
    pub fn with_min_heading_chars(mut self, chars: usize) -> Self {
        self.min_heading_chars = chars;
        self
    }

    /// Add a title that is always accepted as a heading.
    pub fn with_override_title(mut self, title: impl Into<String>) -> Self {
        self.override_titles.push(title.into());
        self
    }

    /// Set the breadcrumb separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Keep ligature characters as extracted.
    pub fn without_ligature_fix(mut self) -> Self {
        self.fix_ligatures = false;
        self
    }

    /// Skip hierarchy reconstruction.
    pub fn flat(mut self) -> Self {
        self.build_hierarchy = false;
        self
    }

    /// Whether `text` is one of the override titles.
    pub fn is_override_title(&self, text: &str) -> bool {
        self.override_titles.iter().any(|t| t == text)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            edge_lines: 5,
            alignment_margin: 10.0,
            running_tolerance: 5.0,
            indent_bucket: 5,
            min_heading_pages: 2,
            min_heading_occurrences: 3,
            min_heading_chars: 3,
            sample_limit: 5,
            override_titles: DEFAULT_OVERRIDE_TITLES.iter().map(|t| t.to_string()).collect(),
            separator: DEFAULT_SEPARATOR.to_string(),
            preamble_heading: "Preamble".to_string(),
            fix_ligatures: true,
            build_hierarchy: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_edge_lines(3)
            .with_heading_repetition(3, 4)
            .with_override_title("Glossary")
            .with_indent_bucket(0)
            .without_ligature_fix()
            .flat();

        assert_eq!(options.edge_lines, 3);
        assert_eq!(options.min_heading_pages, 3);
        assert_eq!(options.min_heading_occurrences, 4);
        assert_eq!(options.indent_bucket, 1);
        assert!(options.is_override_title("Glossary"));
        assert!(!options.fix_ligatures);
        assert!(!options.build_hierarchy);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.edge_lines, 5);
        assert_eq!(options.alignment_margin, 10.0);
        assert_eq!(options.separator, " -> ");
        assert!(options.is_override_title("Table of Contents"));
        assert!(!options.is_override_title("table of contents"));
        assert!(options.fix_ligatures);
        assert!(options.build_hierarchy);
    }
}
