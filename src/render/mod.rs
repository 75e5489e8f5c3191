//! Rendering module for converting outlines to output formats.

mod json;
mod markdown;
mod options;
mod tree;

pub use json::{to_json, to_json_view, JsonFormat, JsonView};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
pub use tree::to_tree;
