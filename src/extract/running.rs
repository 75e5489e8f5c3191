//! Running header and footer detection.
//!
//! The first and last few lines of each page are compared with the lines at
//! the same position on nearby pages. Digits are ignored so page numbers and
//! dates do not defeat the match. Position on the page plays no part in the
//! match, so a running title that drifts a few units between pages is still
//! found. Height only matters when removing a detected line from its own page.
//!
//! Headers are compared against preceding pages only; footers against
//! preceding and following pages. The first page has no predecessor, so its
//! headers are compared against the following pages instead.

use super::lines::LineView;
use super::ExtractOptions;

/// A line near the top or bottom edge of a page.
#[derive(Debug, Clone)]
struct EdgeLine {
    text: String,
    stripped: String,
    top: f32,
    bottom: f32,
}

impl EdgeLine {
    fn from_view(view: &LineView) -> Self {
        Self {
            text: view.text.clone(),
            stripped: strip_digits(&view.text),
            top: view.top,
            bottom: view.bottom,
        }
    }
}

/// Edge lines of one page: top-down from the top, bottom-up from the bottom.
#[derive(Debug, Clone, Default)]
struct PageEdges {
    top: Vec<EdgeLine>,
    bottom: Vec<EdgeLine>,
}

impl PageEdges {
    fn collect(lines: &[LineView], k: usize) -> Self {
        let mut by_top: Vec<&LineView> = lines.iter().filter(|l| !l.text.is_empty()).collect();
        by_top.sort_by(|a, b| a.top.total_cmp(&b.top));
        let top = by_top.iter().take(k).map(|l| EdgeLine::from_view(l)).collect();

        let mut by_bottom = by_top;
        by_bottom.sort_by(|a, b| b.bottom.total_cmp(&a.bottom));
        let bottom = by_bottom
            .iter()
            .take(k)
            .map(|l| EdgeLine::from_view(l))
            .collect();

        Self { top, bottom }
    }
}

/// Header and footer lines detected on one page.
#[derive(Debug, Clone, Default)]
pub struct RunningLines {
    headers: Vec<(String, f32)>,
    footers: Vec<(String, f32)>,
    tolerance: f32,
}

impl RunningLines {
    /// Header texts, top-down.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|(t, _)| t.as_str())
    }

    /// Footer texts, bottom-up.
    pub fn footers(&self) -> impl Iterator<Item = &str> {
        self.footers.iter().map(|(t, _)| t.as_str())
    }

    /// Whether nothing was detected.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.footers.is_empty()
    }

    /// Whether `line` is one of the detected lines: same text, same height.
    pub fn excludes(&self, line: &LineView) -> bool {
        self.headers
            .iter()
            .any(|(t, top)| *t == line.text && (top - line.top).abs() < self.tolerance)
            || self
                .footers
                .iter()
                .any(|(t, bottom)| *t == line.text && (bottom - line.bottom).abs() < self.tolerance)
    }
}

/// Detects running headers and footers across a document's pages.
#[derive(Debug, Clone)]
pub struct RunningLineDetector {
    pages: Vec<PageEdges>,
    tolerance: f32,
}

impl RunningLineDetector {
    /// Collect edge lines for every page.
    pub fn new(pages: &[Vec<LineView>], options: &ExtractOptions) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|lines| PageEdges::collect(lines, options.edge_lines))
                .collect(),
            tolerance: options.running_tolerance,
        }
    }

    /// Detect the running lines of the page at `index` (position in the document).
    pub fn detect(&self, index: usize) -> RunningLines {
        let mut running = RunningLines {
            tolerance: self.tolerance,
            ..Default::default()
        };
        let Some(page) = self.pages.get(index) else {
            return running;
        };

        let header_neighbors = if index == 0 {
            self.neighbors(index, &[1, 2])
        } else {
            self.neighbors(index, &[-1, -2])
        };
        for (i, line) in page.top.iter().enumerate() {
            let repeated = header_neighbors.iter().any(|n| {
                n.top
                    .get(i)
                    .is_some_and(|other| same_line(line, other))
            });
            if !repeated {
                break;
            }
            running.headers.push((line.text.clone(), line.top));
        }

        let footer_neighbors = self.neighbors(index, &[-1, 1, -2, 2]);
        for (i, line) in page.bottom.iter().enumerate() {
            let repeated = footer_neighbors.iter().any(|n| {
                n.bottom
                    .get(i)
                    .is_some_and(|other| same_line(line, other))
            });
            if !repeated {
                break;
            }
            running.footers.push((line.text.clone(), line.bottom));
        }

        if !running.is_empty() {
            log::debug!(
                "page index {}: {} header and {} footer lines",
                index,
                running.headers.len(),
                running.footers.len()
            );
        }
        running
    }

    fn neighbors(&self, index: usize, offsets: &[isize]) -> Vec<&PageEdges> {
        offsets
            .iter()
            .filter_map(|&offset| index.checked_add_signed(offset))
            .filter_map(|i| self.pages.get(i))
            .collect()
    }
}

fn same_line(a: &EdgeLine, b: &EdgeLine) -> bool {
    a.stripped == b.stripped
}

/// Remove every ASCII digit and the surrounding whitespace.
pub fn strip_digits(text: &str) -> String {
    let stripped: String = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    stripped.trim().to_string()
}
