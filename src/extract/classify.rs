//! Heading classification.

use std::fmt;

use super::profile::StyleCatalog;
use super::ExtractOptions;
use crate::model::{FontSize, FormatTag, StyleKey};

/// Why a run was kept as body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Smaller than body text
    BelowNormalSize,
    /// Not bold
    NotBold,
    /// The run's line mixed several styles
    Mixed,
    /// The style is not in the catalog
    UnknownStyle,
    /// The style does not repeat across enough pages or occurrences
    RareStyle,
    /// Too few characters
    TooShort,
    /// Contains sentence punctuation
    HasPeriod,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::BelowNormalSize => "below normal size",
            Rejection::NotBold => "not bold",
            Rejection::Mixed => "mixed styles",
            Rejection::UnknownStyle => "style not in catalog",
            Rejection::RareStyle => "style too rare",
            Rejection::TooShort => "too short",
            Rejection::HasPeriod => "contains a period",
        };
        f.write_str(reason)
    }
}

/// Outcome of classifying a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The run opens a new section
    Heading,
    /// The run is body text of the current section
    Body(Rejection),
}

impl Verdict {
    /// Whether the run is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Verdict::Heading)
    }
}

/// Decides whether a run of text is a heading.
pub struct HeadingClassifier<'a> {
    catalog: &'a StyleCatalog,
    options: &'a ExtractOptions,
    normal_size: FontSize,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over a profiled catalog.
    pub fn new(catalog: &'a StyleCatalog, options: &'a ExtractOptions) -> Self {
        Self {
            catalog,
            options,
            normal_size: catalog.normal_size().unwrap_or_default(),
        }
    }

    /// Body text size used as the heading floor.
    pub fn normal_size(&self) -> FontSize {
        self.normal_size
    }

    /// Classify a run. Override titles are headings whatever their style.
    pub fn classify(&self, text: &str, key: &StyleKey) -> Verdict {
        let text = text.trim();
        match self.check(text, key) {
            Ok(()) => Verdict::Heading,
            Err(_) if self.options.is_override_title(text) => Verdict::Heading,
            Err(rejection) => Verdict::Body(rejection),
        }
    }

    fn check(&self, text: &str, key: &StyleKey) -> Result<(), Rejection> {
        let style = key.style();

        if style.size < self.normal_size {
            return Err(Rejection::BelowNormalSize);
        }
        if !style.has(FormatTag::Bold) {
            return Err(Rejection::NotBold);
        }
        if key.is_mixed() {
            return Err(Rejection::Mixed);
        }

        match self.catalog.lookup(style) {
            Some(entry) => {
                if entry.page_count() < self.options.min_heading_pages
                    || entry.stats.count < self.options.min_heading_occurrences
                {
                    return Err(Rejection::RareStyle);
                }
            }
            None => {
                log::debug!("style {} not found in catalog", style);
                return Err(Rejection::UnknownStyle);
            }
        }

        if text.chars().count() < self.options.min_heading_chars {
            return Err(Rejection::TooShort);
        }
        if text.contains('.') {
            return Err(Rejection::HasPeriod);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::profile::profile_document;
    use crate::model::{Alignment, LayoutDocument, Page, Span, Style};

    /// Body at 10pt on three pages; bold 14pt headings on three pages;
    /// a bold 16pt style seen once.
    fn catalog() -> StyleCatalog {
        let mut doc = LayoutDocument::new();
        for n in 1..=3 {
            let mut page = Page::new(n);
            page.add_line(vec![Span::new("Coverage", [50.0, 40.0, 150.0, 54.0], 14.0, "B").bold()]);
            for i in 0..4 {
                let top = 80.0 + 12.0 * i as f32;
                page.add_line(vec![Span::new("plain words here", [50.0, top, 550.0, top + 10.0], 10.0, "R")]);
            }
            if n == 1 {
                page.add_line(vec![Span::new("Once", [50.0, 200.0, 150.0, 216.0], 16.0, "B").bold()]);
            }
            doc.add_page(page);
        }
        profile_document(&doc, &ExtractOptions::default())
    }

    fn key(size: f32, tags: &[FormatTag]) -> StyleKey {
        StyleKey::Uniform(style(size, tags))
    }

    fn style(size: f32, tags: &[FormatTag]) -> Style {
        Style {
            size: FontSize::from_points(size),
            formatting: tags.iter().copied().collect(),
            alignment: Alignment::Left,
            indentation: 0,
        }
    }

    const HEADING: [FormatTag; 2] = [FormatTag::Bold, FormatTag::TitleCase];

    #[test]
    fn test_accepts_repeated_bold_style() {
        let catalog = catalog();
        let options = ExtractOptions::default();
        let classifier = HeadingClassifier::new(&catalog, &options);
        assert_eq!(classifier.normal_size(), FontSize::from_points(10.0));
        assert_eq!(classifier.classify("Eligibility", &key(14.0, &HEADING)), Verdict::Heading);
    }

    #[test]
    fn test_rejection_cascade() {
        let catalog = catalog();
        let options = ExtractOptions::default();
        let c = HeadingClassifier::new(&catalog, &options);

        assert_eq!(
            c.classify("Small Print", &key(8.0, &HEADING)),
            Verdict::Body(Rejection::BelowNormalSize)
        );
        assert_eq!(
            c.classify("Coverage", &key(14.0, &[FormatTag::TitleCase])),
            Verdict::Body(Rejection::NotBold)
        );
        assert_eq!(
            c.classify("Coverage", &StyleKey::Mixed(style(14.0, &HEADING))),
            Verdict::Body(Rejection::Mixed)
        );
        assert_eq!(
            c.classify("Unseen", &key(20.0, &HEADING)),
            Verdict::Body(Rejection::UnknownStyle)
        );
        assert_eq!(
            c.classify("Once", &key(16.0, &HEADING)),
            Verdict::Body(Rejection::RareStyle)
        );
        assert_eq!(
            c.classify("Ab", &key(14.0, &HEADING)),
            Verdict::Body(Rejection::TooShort)
        );
        assert_eq!(
            c.classify("Introduction.", &key(14.0, &HEADING)),
            Verdict::Body(Rejection::HasPeriod)
        );
    }

    #[test]
    fn test_override_titles_always_accepted() {
        let catalog = catalog();
        let options = ExtractOptions::default();
        let c = HeadingClassifier::new(&catalog, &options);

        assert!(c.classify("Table of Contents", &key(10.0, &[])).is_heading());
        assert!(c
            .classify("Summary of Benefits", &StyleKey::Mixed(style(8.0, &[])))
            .is_heading());
        assert!(!c.classify("Table of contents", &key(10.0, &[])).is_heading());
    }
}
