//! The extraction pass: profile, strip running lines, classify runs, assemble.

use super::assemble::SectionAssembler;
use super::classify::{HeadingClassifier, Verdict};
use super::lines::{page_lines, LineView, Run, RunAccumulator};
use super::profile::{page_number, profile_document, StyleCatalog};
use super::running::RunningLineDetector;
use super::style::StyleResolver;
use super::ExtractOptions;
use crate::error::Result;
use crate::model::{Attributes, LayoutDocument, Outline, Section};

/// Extracts labeled sections from a layout document.
///
/// The style catalog is built once in [`SectionExtractor::new`] and is
/// read-only afterwards.
pub struct SectionExtractor<'a> {
    doc: &'a LayoutDocument,
    options: ExtractOptions,
    catalog: StyleCatalog,
}

impl<'a> SectionExtractor<'a> {
    /// Profile `doc` and prepare an extractor.
    pub fn new(doc: &'a LayoutDocument, options: ExtractOptions) -> Self {
        let catalog = profile_document(doc, &options);
        Self {
            doc,
            options,
            catalog,
        }
    }

    /// The style catalog of the document.
    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Run the pass and return the flat section list, ordered by sequence.
    pub fn extract_sections(&self) -> Vec<Section> {
        let Some(first) = self.doc.pages.first() else {
            return Vec::new();
        };

        let resolver = StyleResolver::new(self.catalog.margins(), &self.options);
        let pages: Vec<Vec<LineView>> = self
            .doc
            .pages
            .iter()
            .map(|page| page_lines(page, &resolver))
            .collect();

        let detector = RunningLineDetector::new(&pages, &self.options);
        let classifier = HeadingClassifier::new(&self.catalog, &self.options);
        let preamble = Attributes::preamble(
            self.catalog.normal_size().unwrap_or_default(),
            page_number(first.number, 0),
        );
        let mut assembler = SectionAssembler::new(&self.options.preamble_heading, preamble);

        for (index, (page, lines)) in self.doc.pages.iter().zip(&pages).enumerate() {
            let number = page_number(page.number, index);
            let running = detector.detect(index);
            let mut runs = RunAccumulator::new();

            for line in lines {
                if running.excludes(line) {
                    log::trace!("page {}: dropping running line {:?}", number, line.text);
                    continue;
                }
                for run in runs.push(line).into_iter().flatten() {
                    dispatch(&classifier, &mut assembler, run, number);
                }
            }
            if let Some(run) = runs.finish() {
                dispatch(&classifier, &mut assembler, run, number);
            }
        }

        assembler.finish()
    }

    /// Run the pass and wrap the result in an [`Outline`], reconstructing the
    /// hierarchy when the options ask for it.
    pub fn extract(&self) -> Result<Outline> {
        let sections = self.extract_sections();
        let mut outline = Outline::new(sections)
            .with_title(self.doc.title.clone())
            .with_separator(self.options.separator.clone());

        if self.options.build_hierarchy {
            outline.build_hierarchy()?;
        }
        outline.validate()?;

        log::info!(
            "extracted {} sections from {} pages ({} styles)",
            outline.len(),
            self.doc.page_count(),
            self.catalog.len()
        );
        Ok(outline)
    }
}

fn dispatch(
    classifier: &HeadingClassifier<'_>,
    assembler: &mut SectionAssembler,
    run: Run,
    page: u32,
) {
    match classifier.classify(&run.text, &run.key) {
        Verdict::Heading => {
            log::debug!("page {}: heading {:?}", page, run.text);
            let attributes = Attributes::from_key(&run.key, page);
            assembler.open_section(run.text.trim(), attributes);
        }
        Verdict::Body(reason) => {
            log::trace!("page {}: body run ({})", page, reason);
            assembler.append_body(&run.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FontSize, Page, Span};

    fn body(text: &str, top: f32) -> Span {
        Span::new(text, [50.0, top, 550.0, top + 10.0], 10.0, "Times")
    }

    fn heading(text: &str, top: f32) -> Span {
        Span::new(text, [50.0, top, 200.0, top + 14.0], 14.0, "Times-Bold").bold()
    }

    fn doc() -> LayoutDocument {
        let mut doc = LayoutDocument::new();
        let chapters = [("Medical Coverage", "hospital"), ("Dental Coverage", "cleanings"), ("Vision Coverage", "lenses")];
        for (n, (title, word)) in chapters.iter().enumerate() {
            let mut page = Page::new(n as u32 + 1);
            page.add_line(vec![heading(title, 60.0)]);
            for i in 0..3 {
                page.add_line(vec![body(&format!("{} line {}", word, i), 100.0 + 14.0 * i as f32)]);
            }
            doc.add_page(page);
        }
        doc
    }

    #[test]
    fn test_extract_sections() {
        let doc = doc();
        let extractor = SectionExtractor::new(&doc, ExtractOptions::default());
        let sections = extractor.extract_sections();

        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Medical Coverage", "Dental Coverage", "Vision Coverage"]);
        assert_eq!(sections[1].page, 2);
        assert_eq!(sections[0].body, "hospital line 0 hospital line 1 hospital line 2");
    }

    #[test]
    fn test_extract_builds_hierarchy() {
        let doc = doc();
        let outline = SectionExtractor::new(&doc, ExtractOptions::default())
            .extract()
            .unwrap();
        assert!(outline.hierarchy_built);
        assert_eq!(outline.sections[2].breadcrumb.as_deref(), Some("Vision Coverage"));
    }

    #[test]
    fn test_extract_flat() {
        let doc = doc();
        let outline = SectionExtractor::new(&doc, ExtractOptions::default().flat())
            .extract()
            .unwrap();
        assert!(!outline.hierarchy_built);
        assert!(outline.sections.iter().all(|s| s.breadcrumb.is_none()));
    }

    #[test]
    fn test_empty_document() {
        let doc = LayoutDocument::new();
        let outline = SectionExtractor::new(&doc, ExtractOptions::default())
            .extract()
            .unwrap();
        assert!(outline.is_empty());
    }

    #[test]
    fn test_body_before_first_heading_is_preamble() {
        let mut doc = doc();
        let mut cover = Page::new(0);
        cover.add_line(vec![body("welcome to the plan", 300.0)]);
        doc.pages.insert(0, cover);
        for (i, page) in doc.pages.iter_mut().enumerate() {
            page.number = i as u32 + 1;
        }

        let sections = SectionExtractor::new(&doc, ExtractOptions::default()).extract_sections();
        assert_eq!(sections[0].heading, "Preamble");
        assert_eq!(sections[0].sequence, 0);
        assert_eq!(sections[0].body, "welcome to the plan");
        assert_eq!(sections[1].heading, "Medical Coverage");
    }

    #[test]
    fn test_indented_heading_nests_under_preamble() {
        let pages = [
            ("welcome to the plan", "Enrollment Window", "sign up in november"),
            ("forms are online", "Plan Changes", "changes take effect in january"),
            ("keep your receipts", "Claim Deadlines", "file within a year"),
        ];
        let mut doc = LayoutDocument::new();
        for (n, (lead, title, text)) in pages.iter().enumerate() {
            let mut page = Page::new(n as u32 + 1);
            page.add_line(vec![body(lead, 60.0)]);
            page.add_line(vec![
                Span::new(*title, [90.0, 80.0, 250.0, 90.0], 10.0, "Times-Bold").bold(),
            ]);
            page.add_line(vec![body(text, 100.0)]);
            doc.add_page(page);
        }

        let outline = SectionExtractor::new(&doc, ExtractOptions::default())
            .extract()
            .unwrap();

        let preamble = &outline.sections[0];
        assert_eq!(preamble.heading, "Preamble");
        assert_eq!(preamble.attributes.size, FontSize::from_points(10.0));
        assert_eq!(preamble.attributes.indentation, 0);

        // Same size as the preamble but indented, so it ranks below it
        assert_eq!(outline.sections[1].parent, Some(0));
        assert_eq!(
            outline.sections[1].breadcrumb.as_deref(),
            Some("Preamble -> Enrollment Window")
        );
        assert_eq!(
            outline.sections[3].breadcrumb.as_deref(),
            Some("Preamble -> Claim Deadlines")
        );
    }
}
