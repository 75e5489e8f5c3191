//! Hierarchy reconstruction from a flat, ordered section list.
//!
//! There are no heading levels in the input, only pairwise comparisons.
//! A stack holds the path from the root to the latest section; each new
//! section pops everything it outranks, replaces an equal sibling, or
//! nests under whatever remains.

use std::cmp::Ordering;

use crate::model::{Attributes, FormatTag, Section};

/// Compare two headings. `Greater` means `current` is more important.
///
/// Evaluated once per stack step; the relation is not a global ranking.
pub fn compare_headings(current: &Attributes, previous: &Attributes) -> Ordering {
    if current.size != previous.size {
        return current.size.cmp(&previous.size);
    }

    match (current.has(FormatTag::AllCaps), previous.has(FormatTag::AllCaps)) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }

    match (
        current.alignment.is_prominent(),
        previous.alignment.is_prominent(),
    ) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (true, true) => return Ordering::Equal,
        (false, false) => {}
    }

    previous.indentation.cmp(&current.indentation)
}

/// Assign `path`, `breadcrumb` and `parent` to every section.
///
/// Sections must already be sorted by sequence; their order is left untouched.
pub fn reconstruct(sections: &mut [Section], separator: &str) {
    let mut stack: Vec<usize> = Vec::new();

    for i in 0..sections.len() {
        while let Some(&top) = stack.last() {
            if compare_headings(&sections[i].attributes, &sections[top].attributes)
                == Ordering::Greater
            {
                stack.pop();
            } else {
                break;
            }
        }

        if let Some(&top) = stack.last() {
            if compare_headings(&sections[i].attributes, &sections[top].attributes)
                == Ordering::Equal
            {
                stack.pop();
            }
        }
        stack.push(i);

        let path: Vec<String> = stack.iter().map(|&j| sections[j].heading.clone()).collect();
        let parent = stack
            .len()
            .checked_sub(2)
            .map(|p| sections[stack[p]].sequence);

        let section = &mut sections[i];
        section.breadcrumb = Some(path.join(separator));
        section.path = path;
        section.parent = parent;
    }

    log::debug!("reconstructed hierarchy for {} sections", sections.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, FontSize};

    fn attrs(size: f32) -> Attributes {
        Attributes {
            size: FontSize::from_points(size),
            alignment: Alignment::Left,
            ..Default::default()
        }
    }

    fn sections(specs: &[(&str, Attributes)]) -> Vec<Section> {
        specs
            .iter()
            .enumerate()
            .map(|(i, (h, a))| Section::new(*h, a.clone(), i as u32 + 1))
            .collect()
    }

    fn breadcrumbs(sections: &[Section]) -> Vec<&str> {
        sections
            .iter()
            .map(|s| s.breadcrumb.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_compare_size_first() {
        assert_eq!(compare_headings(&attrs(16.0), &attrs(14.0)), Ordering::Greater);
        assert_eq!(compare_headings(&attrs(12.0), &attrs(14.0)), Ordering::Less);
    }

    #[test]
    fn test_compare_caps() {
        let mut caps = attrs(14.0);
        caps.formatting.insert(FormatTag::AllCaps);
        assert_eq!(compare_headings(&caps, &attrs(14.0)), Ordering::Greater);
        assert_eq!(compare_headings(&attrs(14.0), &caps), Ordering::Less);
    }

    #[test]
    fn test_compare_alignment() {
        let mut centered = attrs(14.0);
        centered.alignment = Alignment::Center;
        let mut right = attrs(14.0);
        right.alignment = Alignment::Right;
        let unknown = Attributes {
            size: FontSize::from_points(14.0),
            ..Default::default()
        };

        assert_eq!(compare_headings(&centered, &attrs(14.0)), Ordering::Greater);
        assert_eq!(compare_headings(&attrs(14.0), &centered), Ordering::Less);
        assert_eq!(compare_headings(&centered, &right), Ordering::Equal);
        assert_eq!(compare_headings(&unknown, &attrs(14.0)), Ordering::Equal);
    }

    #[test]
    fn test_compare_indentation() {
        let mut indented = attrs(14.0);
        indented.indentation = 80;
        assert_eq!(compare_headings(&attrs(14.0), &indented), Ordering::Greater);
        assert_eq!(compare_headings(&indented, &attrs(14.0)), Ordering::Less);
    }

    #[test]
    fn test_sizes_16_14_14_16() {
        let mut list = sections(&[
            ("H1", attrs(16.0)),
            ("H2", attrs(14.0)),
            ("H2'", attrs(14.0)),
            ("H1'", attrs(16.0)),
        ]);
        reconstruct(&mut list, " -> ");

        assert_eq!(breadcrumbs(&list), vec!["H1", "H1 -> H2", "H1 -> H2'", "H1'"]);
        assert_eq!(list[1].parent, Some(1));
        assert_eq!(list[2].parent, Some(1));
        assert_eq!(list[3].parent, None);
    }

    #[test]
    fn test_underflow_starts_new_root() {
        let mut list = sections(&[("Small", attrs(10.0)), ("Big", attrs(20.0)), ("Mid", attrs(15.0))]);
        reconstruct(&mut list, " / ");

        assert_eq!(breadcrumbs(&list), vec!["Small", "Big", "Big / Mid"]);
        assert_eq!(list[1].path, vec!["Big"]);
    }

    #[test]
    fn test_deep_nesting_and_unwind() {
        let mut list = sections(&[
            ("A", attrs(20.0)),
            ("B", attrs(16.0)),
            ("C", attrs(12.0)),
            ("D", attrs(16.0)),
        ]);
        reconstruct(&mut list, " -> ");
        assert_eq!(breadcrumbs(&list), vec!["A", "A -> B", "A -> B -> C", "A -> D"]);
        assert_eq!(list[2].depth(), 3);
    }

    #[test]
    fn test_empty_is_noop() {
        let mut list: Vec<Section> = Vec::new();
        reconstruct(&mut list, " -> ");
        assert!(list.is_empty());
    }
}
