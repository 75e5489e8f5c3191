//! Style profiling: a document-wide catalog of visual styles.
//!
//! The catalog is what makes repetition usable as a signal. A bold line
//! is only a heading candidate if its style shows up often enough, on
//! enough pages, to look like part of the document's structure.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::style::{PageMargins, StyleResolver};
use super::ExtractOptions;
use crate::model::{FontSize, LayoutDocument, Style};

/// Usage statistics of one style.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleStats {
    /// Number of spans with this style
    pub count: usize,
    /// Distinct page numbers the style appears on
    pub pages: BTreeSet<u32>,
    /// First few distinct texts seen with this style
    pub samples: Vec<String>,
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// The style
    pub style: Style,
    /// Its statistics
    pub stats: StyleStats,
}

impl CatalogEntry {
    /// Number of distinct pages.
    pub fn page_count(&self) -> usize {
        self.stats.pages.len()
    }
}

/// Catalog of every style in a document, most frequent first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleCatalog {
    entries: Vec<CatalogEntry>,
    #[serde(skip)]
    by_key: HashMap<Style, usize>,
    #[serde(skip)]
    margins: PageMargins,
}

impl StyleCatalog {
    /// Entries sorted by descending count, then descending page coverage.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Document margins observed while profiling.
    pub fn margins(&self) -> PageMargins {
        self.margins
    }

    /// Number of distinct styles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no style was observed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `rank` (0 is the most frequent).
    pub fn get(&self, rank: usize) -> Option<&CatalogEntry> {
        self.entries.get(rank)
    }

    /// The most frequent style.
    pub fn dominant(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    /// Body text size: the size of the most frequent style.
    pub fn normal_size(&self) -> Option<FontSize> {
        self.dominant().map(|e| e.style.size)
    }

    /// Look up a style by size, formatting and alignment, plus indentation
    /// when the style is left-aligned.
    pub fn lookup(&self, style: &Style) -> Option<&CatalogEntry> {
        self.by_key
            .get(&style.lookup_key())
            .map(|&i| &self.entries[i])
    }
}

/// Compute the content box: minimum left and maximum right over all spans.
pub fn page_margins(doc: &LayoutDocument) -> PageMargins {
    let mut spans = doc.spans().filter(|s| s.is_well_formed()).peekable();
    if spans.peek().is_none() {
        return PageMargins::default();
    }

    spans.fold(
        PageMargins {
            left: f32::INFINITY,
            right: f32::NEG_INFINITY,
        },
        |m, s| PageMargins {
            left: m.left.min(s.left()),
            right: m.right.max(s.right()),
        },
    )
}

/// Build the style catalog of a document.
pub fn profile_document(doc: &LayoutDocument, options: &ExtractOptions) -> StyleCatalog {
    let margins = page_margins(doc);
    let resolver = StyleResolver::new(margins, options);

    let mut stats: HashMap<Style, StyleStats> = HashMap::new();

    for (index, page) in doc.pages.iter().enumerate() {
        let page_number = page_number(page.number, index);

        for line in page.lines() {
            let Some(extent) = line_extent(line) else {
                continue;
            };

            for span in line.well_formed_spans() {
                let resolved = resolver.resolve(span, extent, page);
                let entry = stats.entry(resolved.style.lookup_key()).or_default();
                entry.count += 1;
                entry.pages.insert(page_number);
                if entry.samples.len() < options.sample_limit
                    && !entry.samples.contains(&resolved.text)
                {
                    entry.samples.push(resolved.text);
                }
            }
        }
    }

    let mut entries: Vec<CatalogEntry> = stats
        .into_iter()
        .map(|(style, stats)| CatalogEntry { style, stats })
        .collect();
    entries.sort_by(|a, b| {
        b.stats
            .count
            .cmp(&a.stats.count)
            .then_with(|| b.page_count().cmp(&a.page_count()))
            .then_with(|| a.style.cmp(&b.style))
    });

    let by_key = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.style.clone(), i))
        .collect();

    log::debug!(
        "profiled {} styles, margins {:.1}..{:.1}",
        entries.len(),
        margins.left,
        margins.right
    );

    StyleCatalog {
        entries,
        by_key,
        margins,
    }
}

/// 1-based page number, falling back to the page's position.
pub(crate) fn page_number(number: u32, index: usize) -> u32 {
    if number == 0 {
        index as u32 + 1
    } else {
        number
    }
}

/// Horizontal extent of a line's well-formed spans.
pub(crate) fn line_extent(line: &crate::model::Line) -> Option<(f32, f32)> {
    line.well_formed_spans().fold(None, |acc, s| match acc {
        None => Some((s.left(), s.right())),
        Some((l, r)) => Some((l.min(s.left()), r.max(s.right()))),
    })
}
