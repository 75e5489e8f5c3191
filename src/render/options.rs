//! Rendering options and configuration.

/// Options for rendering an outline.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include section bodies
    pub include_body: bool,

    /// Include YAML frontmatter with outline metadata
    pub include_frontmatter: bool,

    /// Include summaries and classifications when present
    pub include_enrichment: bool,

    /// Skip sections nested deeper than this (1 = roots only)
    pub max_depth: Option<usize>,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable section bodies.
    pub fn with_body(mut self, include: bool) -> Self {
        self.include_body = include;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable enrichment output.
    pub fn with_enrichment(mut self, include: bool) -> Self {
        self.include_enrichment = include;
        self
    }

    /// Limit the rendered depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth.max(1));
        self
    }

    /// Whether a section at `depth` is rendered.
    pub fn includes_depth(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_body: true,
            include_frontmatter: false,
            include_enrichment: true,
            max_depth: None,
            escape_special_chars: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.include_body);
        assert!(!options.include_frontmatter);
        assert!(options.includes_depth(42));
    }

    #[test]
    fn test_max_depth() {
        let options = RenderOptions::new().with_max_depth(0);
        assert_eq!(options.max_depth, Some(1));
        assert!(options.includes_depth(1));
        assert!(!options.includes_depth(2));
    }
}
