//! Style resolution: alignment, indentation and formatting tags of a span.

use regex::Regex;

use super::ExtractOptions;
use crate::model::{
    Alignment, FontSize, FormatTag, Formatting, Page, Span, Style, FLAG_BOLD, FLAG_BOLD_ALT,
    FLAG_ITALIC, FLAG_UNDERLINE,
};

/// Function words that stay lowercase in Title Case. Only the last word may capitalize one.
pub const SMALL_WORDS: [&str; 15] = [
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "of", "on", "or", "the", "to", "with",
];

/// Effective content box of the document: leftmost and rightmost span edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageMargins {
    /// Minimum left edge observed
    pub left: f32,
    /// Maximum right edge observed
    pub right: f32,
}

/// A span's resolved style and its text.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpan {
    /// Visual style
    pub style: Style,
    /// Trimmed text, in the case the document prints it
    pub text: String,
}

/// Resolves spans to styles against fixed page margins.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    margins: PageMargins,
    tolerance: f32,
    bucket: i32,
    ligatures: bool,
    word_group: Regex,
}

impl StyleResolver {
    /// Create a resolver for a document with the given margins.
    pub fn new(margins: PageMargins, options: &ExtractOptions) -> Self {
        Self {
            margins,
            tolerance: options.alignment_margin,
            bucket: options.indent_bucket.max(1),
            ligatures: options.fix_ligatures,
            word_group: Regex::new(r"\(([^)]*)|[^\s()]+").expect("static pattern"),
        }
    }

    /// The margins this resolver measures against.
    pub fn margins(&self) -> PageMargins {
        self.margins
    }

    /// Whether line text gets its typographic ligatures expanded.
    pub fn fixes_ligatures(&self) -> bool {
        self.ligatures
    }

    /// Classify a horizontal extent as left, center or right aligned.
    ///
    /// Only indented left-aligned text gets a non-zero indentation bucket.
    pub fn alignment(&self, left: f32, right: f32) -> (Alignment, i32) {
        let left_gap = left - self.margins.left;
        let right_gap = self.margins.right - right;

        if left < self.margins.left + self.tolerance {
            (Alignment::Left, 0)
        } else if (left_gap - right_gap).abs() < self.tolerance {
            (Alignment::Center, 0)
        } else if right > self.margins.right - self.tolerance {
            (Alignment::Right, 0)
        } else {
            let indentation = (left / self.bucket as f32).floor() as i32 * self.bucket;
            (Alignment::Left, indentation)
        }
    }

    /// Resolve a span's style. `extent` is the horizontal extent of its line.
    pub fn resolve(&self, span: &Span, extent: (f32, f32), page: &Page) -> ResolvedSpan {
        let text = span.trimmed().to_string();
        let mut formatting = flag_tags(span.flags);

        if is_all_caps(&text) || page.is_all_caps_font(&span.font) {
            formatting.insert(FormatTag::AllCaps);
        } else if self.is_title_case(&text) {
            formatting.insert(FormatTag::TitleCase);
        }

        let (alignment, indentation) = self.alignment(extent.0, extent.1);

        ResolvedSpan {
            style: Style {
                size: FontSize::from_points(span.size),
                formatting,
                alignment,
                indentation,
            },
            text,
        }
    }

    /// Title Case test.
    ///
    /// The first word must start with a capital. Every later word must too,
    /// except small function words, which must stay lowercase unless they
    /// are the last word. A parenthesized segment counts as one word.
    pub fn is_title_case(&self, text: &str) -> bool {
        let words: Vec<&str> = self
            .word_group
            .captures_iter(text)
            .filter_map(|c| c.get(1).or_else(|| c.get(0)))
            .map(|m| m.as_str())
            .filter(|w| !w.is_empty())
            .collect();

        let Some(first) = words.first() else {
            return false;
        };
        if !starts_upper(first) {
            return false;
        }

        let last = words.len() - 1;
        words.iter().enumerate().skip(1).all(|(i, word)| {
            if SMALL_WORDS.contains(&word.to_lowercase().as_str()) {
                i == last || !starts_upper(word)
            } else {
                starts_upper(word)
            }
        })
    }
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Formatting tags carried by the style-flag bitmask.
pub fn flag_tags(flags: u32) -> Formatting {
    let mut tags = Formatting::new();
    if flags & (FLAG_BOLD | FLAG_BOLD_ALT) != 0 {
        tags.insert(FormatTag::Bold);
    }
    if flags & FLAG_ITALIC != 0 {
        tags.insert(FormatTag::Italic);
    }
    if flags & FLAG_UNDERLINE != 0 {
        tags.insert(FormatTag::Underline);
    }
    tags
}

/// Whether every letter in `text` is uppercase (and there is at least one).
pub fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}
