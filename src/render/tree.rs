//! Plain text tree rendering for section outlines.

use crate::model::Outline;

/// Render the outline as an indented tree, one section per line.
///
/// Each level indents by two spaces; the heading's page follows in brackets.
pub fn to_tree(outline: &Outline) -> String {
    let mut output = String::new();

    if let Some(ref title) = outline.title {
        output.push_str(title);
        output.push('\n');
    }

    for section in &outline.sections {
        let depth = section.depth().max(1);
        output.push_str(&"  ".repeat(depth - 1));
        output.push_str(section.display_heading());
        output.push_str(&format!(" [p.{}]", section.page));
        output.push('\n');
    }

    output
}
