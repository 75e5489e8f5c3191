//! Line views and run accumulation.

use super::profile::line_extent;
use super::style::StyleResolver;
use crate::model::{Page, StyleKey};

/// Ligature characters and their plain-letter spelling.
///
/// U+019F is not a ligature, but some PDF producers emit it for "ti".
pub const LIGATURES: [(&str, &str); 8] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
    ("\u{019F}", "ti"),
];

/// Replace ligature characters with the letters they stand for.
pub fn fix_ligatures(text: &str) -> String {
    let mut result = text.to_string();
    for (ligature, replacement) in LIGATURES {
        if result.contains(ligature) {
            result = result.replace(ligature, replacement);
        }
    }
    result
}

/// A resolved line: text, geometry and style key.
#[derive(Debug, Clone)]
pub struct LineView {
    /// Span texts joined by single spaces
    pub text: String,
    /// Topmost span edge
    pub top: f32,
    /// Bottommost span edge
    pub bottom: f32,
    /// Leftmost span edge
    pub left: f32,
    /// Rightmost span edge
    pub right: f32,
    /// First span's style; `Mixed` when the spans disagree on size, font or flags
    pub key: StyleKey,
}

impl LineView {
    /// Whether every span in the line shares one style.
    pub fn is_uniform(&self) -> bool {
        !self.key.is_mixed()
    }
}

/// Resolve a page's lines in reading order. Lines without usable spans are skipped.
pub fn page_lines(page: &Page, resolver: &StyleResolver) -> Vec<LineView> {
    let mut views = Vec::new();

    for line in page.lines() {
        let Some(extent) = line_extent(line) else {
            log::trace!("page {}: skipping line without usable spans", page.number);
            continue;
        };

        let mut spans = line.well_formed_spans();
        let Some(first) = spans.next() else {
            continue;
        };

        let head = resolver.resolve(first, extent, page);
        let mut text = head.text;
        let mut top = first.top();
        let mut bottom = first.bottom();
        let mut uniform = true;

        for span in spans {
            uniform &= span.same_face(first);
            let resolved = resolver.resolve(span, extent, page);
            text.push(' ');
            text.push_str(&resolved.text);
            top = top.min(span.top());
            bottom = bottom.max(span.bottom());
        }

        if resolver.fixes_ligatures() {
            text = fix_ligatures(&text);
        }

        let key = if uniform {
            StyleKey::Uniform(head.style)
        } else {
            StyleKey::Mixed(head.style)
        };

        views.push(LineView {
            text,
            top,
            bottom,
            left: extent.0,
            right: extent.1,
            key,
        });
    }

    views
}

/// Consecutive same-style lines, handed to the classifier as one unit.
#[derive(Debug, Clone)]
pub struct Run {
    /// Joined line texts
    pub text: String,
    /// Shared style key
    pub key: StyleKey,
}

/// Merges consecutive lines sharing one style key into runs.
#[derive(Debug, Default)]
pub struct RunAccumulator {
    open: Option<Run>,
}

impl RunAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns the runs that are complete, in order.
    ///
    /// A mixed line closes the open run and is returned on its own right away.
    pub fn push(&mut self, line: &LineView) -> [Option<Run>; 2] {
        if let Some(open) = self.open.as_mut() {
            if open.key == line.key {
                open.text.push(' ');
                open.text.push_str(&line.text);
                return [None, None];
            }
        }

        let flushed = self.open.take();
        let run = Run {
            text: line.text.clone(),
            key: line.key.clone(),
        };

        if run.key.is_mixed() {
            [flushed, Some(run)]
        } else {
            self.open = Some(run);
            [flushed, None]
        }
    }

    /// Flush the open run at the end of a page.
    pub fn finish(&mut self) -> Option<Run> {
        self.open.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::style::PageMargins;
    use crate::extract::ExtractOptions;
    use crate::model::{FormatTag, Span};

    fn resolver() -> StyleResolver {
        StyleResolver::new(
            PageMargins {
                left: 50.0,
                right: 550.0,
            },
            &ExtractOptions::default(),
        )
    }

    fn view(text: &str, top: f32, spans: Vec<Span>) -> LineView {
        let mut page = Page::new(1);
        page.add_line(spans);
        let mut views = page_lines(&page, &resolver());
        let mut v = views.remove(0);
        v.text = text.to_string();
        v.top = top;
        v
    }

    fn plain(top: f32) -> Span {
        Span::new("body text", [50.0, top, 500.0, top + 10.0], 10.0, "Times")
    }

    fn mixed(top: f32) -> Vec<Span> {
        vec![
            Span::new("Note:", [50.0, top, 80.0, top + 10.0], 10.0, "Times-Bold").bold(),
            Span::new("see below", [82.0, top, 200.0, top + 10.0], 10.0, "Times"),
        ]
    }

    #[test]
    fn test_page_lines_uniform_and_mixed() {
        let mut page = Page::new(1);
        page.add_line(vec![
            Span::new("Claims", [50.0, 10.0, 90.0, 24.0], 14.0, "Times-Bold").bold(),
            Span::new("Process", [92.0, 10.0, 150.0, 24.0], 14.0, "Times-Bold").bold(),
        ]);
        page.add_line(mixed(40.0));
        page.add_line(vec![Span::new("  ", [0.0, 0.0, 0.0, 0.0], 10.0, "Times")]);

        let views = page_lines(&page, &resolver());
        assert_eq!(views.len(), 2);

        assert_eq!(views[0].text, "Claims Process");
        assert!(views[0].is_uniform());
        assert!(views[0].key.style().has(FormatTag::Bold));
        assert_eq!(views[0].left, 50.0);
        assert_eq!(views[0].right, 150.0);

        assert_eq!(views[1].text, "Note: see below");
        assert!(!views[1].is_uniform());
    }

    #[test]
    fn test_fix_ligatures() {
        assert_eq!(fix_ligatures("Bene\u{FB01}ts"), "Benefits");
        assert_eq!(fix_ligatures("\u{FB02}exible spending"), "flexible spending");
        assert_eq!(fix_ligatures("O\u{FB03}ce visits"), "Office visits");
        assert_eq!(fix_ligatures("Coordina\u{019F}on"), "Coordination");
        assert_eq!(fix_ligatures("plain text"), "plain text");
    }

    #[test]
    fn test_page_lines_expand_ligatures() {
        let mut page = Page::new(1);
        page.add_line(vec![
            Span::new("Summary of", [50.0, 10.0, 120.0, 20.0], 10.0, "Times"),
            Span::new("Bene\u{FB01}ts", [122.0, 10.0, 180.0, 20.0], 10.0, "Times"),
        ]);

        let views = page_lines(&page, &resolver());
        assert_eq!(views[0].text, "Summary of Benefits");

        let raw = StyleResolver::new(
            resolver().margins(),
            &ExtractOptions::default().without_ligature_fix(),
        );
        assert_eq!(page_lines(&page, &raw)[0].text, "Summary of Bene\u{FB01}ts");
    }

    #[test]
    fn test_page_lines_keep_case_in_all_caps_font() {
        let mut page = Page::new(1);
        page.add_font("Caps", crate::model::FontInfo { all_caps: true });
        page.add_line(vec![Span::new("Member services", [50.0, 10.0, 200.0, 20.0], 10.0, "Caps")]);

        let views = page_lines(&page, &resolver());
        assert_eq!(views[0].text, "Member services");
        assert!(views[0].key.style().has(FormatTag::AllCaps));
    }

    #[test]
    fn test_accumulator_merges_same_style() {
        let mut acc = RunAccumulator::new();
        let a = view("first line", 10.0, vec![plain(10.0)]);
        let b = view("second line", 22.0, vec![plain(22.0)]);

        assert!(acc.push(&a).iter().all(Option::is_none));
        assert!(acc.push(&b).iter().all(Option::is_none));

        let run = acc.finish().unwrap();
        assert_eq!(run.text, "first line second line");
        assert!(acc.finish().is_none());
    }

    #[test]
    fn test_accumulator_flushes_on_style_change() {
        let mut acc = RunAccumulator::new();
        let heading = view(
            "Eligibility",
            10.0,
            vec![Span::new("Eligibility", [50.0, 10.0, 150.0, 24.0], 14.0, "Times-Bold").bold()],
        );
        let body = view("body text", 30.0, vec![plain(30.0)]);

        acc.push(&heading);
        let [flushed, extra] = acc.push(&body);
        assert_eq!(flushed.unwrap().text, "Eligibility");
        assert!(extra.is_none());
        assert_eq!(acc.finish().unwrap().text, "body text");
    }

    #[test]
    fn test_accumulator_mixed_lines_stand_alone() {
        let mut acc = RunAccumulator::new();
        let lines: Vec<LineView> = (0..3)
            .map(|i| view(&format!("mixed {}", i), 10.0 * i as f32, mixed(10.0 * i as f32)))
            .collect();

        let mut runs = Vec::new();
        for line in &lines {
            runs.extend(acc.push(line).into_iter().flatten());
        }
        runs.extend(acc.finish());

        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["mixed 0", "mixed 1", "mixed 2"]);
        assert!(runs.iter().all(|r| r.key.is_mixed()));
    }
}
