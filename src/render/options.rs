//! Rendering options and configuration.

/// Options for rendering a page to Markdown.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Spaces per list nesting level
    pub indent_width: usize,

    /// Character to use for unordered list markers
    pub list_marker: char,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of spaces per list nesting level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            list_marker: '-',
        }
    }
}
