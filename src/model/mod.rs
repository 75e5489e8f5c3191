//! Document model types.
//!
//! The layout types are the input boundary handed over by a PDF layout
//! library. The style, section and outline types are what the extraction
//! engine produces from them.

mod layout;
mod outline;
mod section;
mod style;

pub use layout::{
    Block, FontInfo, LayoutDocument, Line, Page, Span, FLAG_BOLD, FLAG_BOLD_ALT, FLAG_ITALIC,
    FLAG_UNDERLINE,
};
pub use outline::{
    Outline, OutlineEntry, SectionContext, SectionDigest, SectionIndex, DEFAULT_SEPARATOR,
};
pub use section::Section;
pub use style::{Alignment, Attributes, FontSize, FormatTag, Formatting, Style, StyleKey};
