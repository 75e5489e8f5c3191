//! Visual style types: font size, formatting tags, alignment and style keys.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Font size rounded to two decimals, stored as hundredths of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct FontSize(u32);

impl FontSize {
    /// Round a raw size to two decimals.
    pub fn from_points(size: f32) -> Self {
        if !size.is_finite() || size <= 0.0 {
            return FontSize(0);
        }
        FontSize((size * 100.0).round() as u32)
    }

    /// Size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Size in hundredths of a point.
    pub fn hundredths(self) -> u32 {
        self.0
    }
}

impl From<f32> for FontSize {
    fn from(size: f32) -> Self {
        FontSize::from_points(size)
    }
}

impl From<FontSize> for f32 {
    fn from(size: FontSize) -> Self {
        size.points()
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// A formatting tag derived from font flags and text shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    /// Bold weight
    Bold,
    /// Italic
    Italic,
    /// Underlined
    Underline,
    /// ALL CAPS text or an all-caps font
    AllCaps,
    /// Title Case text
    TitleCase,
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatTag::Bold => "bold",
            FormatTag::Italic => "italic",
            FormatTag::Underline => "underline",
            FormatTag::AllCaps => "ALL CAPS",
            FormatTag::TitleCase => "Title Case",
        };
        f.write_str(name)
    }
}

/// Sorted set of formatting tags.
pub type Formatting = BTreeSet<FormatTag>;

/// Horizontal alignment of a line relative to the content box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Flush with the left margin (possibly indented)
    Left,
    /// Centered between the margins
    Center,
    /// Flush with the right margin
    Right,
    /// No geometry (synthetic sections)
    #[default]
    Unknown,
}

impl Alignment {
    /// Center and right alignment read as structurally higher-level.
    pub fn is_prominent(self) -> bool {
        matches!(self, Alignment::Center | Alignment::Right)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The comparable visual signature of a span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Style {
    /// Font size
    pub size: FontSize,
    /// Formatting tags
    pub formatting: Formatting,
    /// Alignment
    pub alignment: Alignment,
    /// Indentation bucket (0 unless left-aligned and indented)
    pub indentation: i32,
}

impl Style {
    /// Whether the style carries `tag`.
    pub fn has(&self, tag: FormatTag) -> bool {
        self.formatting.contains(&tag)
    }

    /// Key used for catalog lookups: indentation only counts for left-aligned text.
    pub fn lookup_key(&self) -> Style {
        let mut key = self.clone();
        if key.alignment != Alignment::Left {
            key.indentation = 0;
        }
        key
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<String> = self.formatting.iter().map(|t| t.to_string()).collect();
        write!(
            f,
            "{}pt [{}] {}",
            self.size,
            tags.join(", "),
            self.alignment
        )?;
        if self.indentation != 0 {
            write!(f, " +{}", self.indentation)?;
        }
        Ok(())
    }
}

/// Style of an accumulated run of lines.
///
/// `Mixed` marks a line whose spans disagree on style. It never compares
/// equal to anything, itself included, so a mixed line is always flushed
/// alone. The payload is the first span's style, kept for section attributes.
#[derive(Debug, Clone)]
pub enum StyleKey {
    /// Every span shares this style
    Uniform(Style),
    /// Spans disagree
    Mixed(Style),
}

impl StyleKey {
    /// The underlying style (first span's style for mixed lines).
    pub fn style(&self) -> &Style {
        match self {
            StyleKey::Uniform(style) | StyleKey::Mixed(style) => style,
        }
    }

    /// Whether this is the mixed sentinel.
    pub fn is_mixed(&self) -> bool {
        matches!(self, StyleKey::Mixed(_))
    }
}

impl PartialEq for StyleKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StyleKey::Uniform(a), StyleKey::Uniform(b)) => a == b,
            _ => false,
        }
    }
}

/// Structured section attributes derived from a run's style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Font size
    pub size: FontSize,
    /// Formatting tags
    pub formatting: Formatting,
    /// Alignment
    pub alignment: Alignment,
    /// Indentation bucket
    pub indentation: i32,
    /// Page the heading came from (1-indexed)
    pub page: u32,
    /// The heading line mixed several styles
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mixed: bool,
}

impl Attributes {
    /// Build attributes from a run's style key.
    pub fn from_key(key: &StyleKey, page: u32) -> Self {
        let style = key.style();
        Self {
            size: style.size,
            formatting: style.formatting.clone(),
            alignment: style.alignment,
            indentation: style.indentation,
            page,
            mixed: key.is_mixed(),
        }
    }

    /// Attributes of a synthetic section with no visual origin.
    pub fn synthetic(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Attributes of the preamble: body size, flush left, no formatting.
    pub fn preamble(size: FontSize, page: u32) -> Self {
        Self {
            size,
            alignment: Alignment::Left,
            indentation: 0,
            page,
            ..Default::default()
        }
    }

    /// Whether the attributes carry `tag`.
    pub fn has(&self, tag: FormatTag) -> bool {
        self.formatting.contains(&tag)
    }
}
