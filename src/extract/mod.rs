//! Section extraction engine.

mod assemble;
mod classify;
mod extractor;
pub mod hierarchy;
mod lines;
mod options;
mod profile;
mod running;
mod style;

pub use assemble::SectionAssembler;
pub use classify::{HeadingClassifier, Rejection, Verdict};
pub use extractor::SectionExtractor;
pub use hierarchy::{compare_headings, reconstruct};
pub use lines::{fix_ligatures, page_lines, LineView, Run, RunAccumulator, LIGATURES};
pub use options::{ExtractOptions, DEFAULT_OVERRIDE_TITLES};
pub use profile::{page_margins, profile_document, CatalogEntry, StyleCatalog, StyleStats};
pub use running::{strip_digits, RunningLineDetector, RunningLines};
pub use style::{flag_tags, is_all_caps, PageMargins, ResolvedSpan, StyleResolver, SMALL_WORDS};
