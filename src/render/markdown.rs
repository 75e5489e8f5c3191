//! Markdown rendering for section outlines.

use crate::error::Result;
use crate::model::{Outline, Section};

use super::RenderOptions;

/// Convert an outline to Markdown.
pub fn to_markdown(outline: &Outline, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(outline)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render an outline to Markdown.
    ///
    /// Heading levels follow hierarchy depth; a flat outline renders every
    /// section at level 1.
    pub fn render(self, outline: &Outline) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&frontmatter(outline));
        }

        for section in &outline.sections {
            let depth = section.depth().max(1);
            if self.options.includes_depth(depth) {
                self.render_section(&mut output, section, depth);
            }
        }

        Ok(output.trim().to_string())
    }

    fn render_section(&self, output: &mut String, section: &Section, depth: usize) {
        let level = depth.clamp(1, 6);
        output.push_str(&"#".repeat(level));
        output.push(' ');
        output.push_str(&self.escape(section.display_heading()));
        output.push_str("\n\n");

        if self.options.include_enrichment {
            if let Some(ref class) = section.classification {
                output.push_str(&format!("*{}*\n\n", class));
            }
            if let Some(ref summary) = section.summary {
                output.push_str("> ");
                output.push_str(&self.escape(summary));
                output.push_str("\n\n");
            }
        }

        if self.options.include_body && !section.has_empty_body() {
            output.push_str(&self.escape(section.body.trim()));
            output.push_str("\n\n");
        }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

fn frontmatter(outline: &Outline) -> String {
    let mut lines = vec!["---".to_string()];

    if let Some(ref title) = outline.title {
        lines.push(format!("title: \"{}\"", escape_yaml(title)));
    }
    lines.push(format!("generated_at: {}", outline.generated_at.to_rfc3339()));
    lines.push(format!("sections: {}", outline.len()));
    lines.push(format!("hierarchy: {}", outline.hierarchy_built));

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(String::new());

    lines.join("\n")
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape characters that could be misread as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
