//! Line-level and inline types.

use serde::{Deserialize, Serialize};

/// One rendered unit of content, analogous to a paragraph or list item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Inline content in source order
    pub content: Vec<Inline>,

    /// List nesting level, if this line carries an indentation marker.
    ///
    /// `Some(0)` means the marker is present but has zero width; the line is
    /// still a list item. `None` means the line is not a list item.
    pub indent: Option<u8>,
}

impl Line {
    /// Create a new empty line.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            indent: None,
        }
    }

    /// Create a line with plain text content.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut line = Self::new();
        line.push_text(text);
        line
    }

    /// Create a heading line.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut line = Self::new();
        line.content.push(Inline::Heading {
            level: level.clamp(1, 5),
            text: text.into(),
        });
        line
    }

    /// Mark this line as a list item at the given nesting level.
    pub fn with_indent(mut self, level: u8) -> Self {
        self.indent = Some(level);
        self
    }

    /// Append plain text, merging with a trailing text segment if present.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = self.content.last_mut() {
            last.push_str(&text);
        } else {
            self.content.push(Inline::Text(text));
        }
    }

    /// Append an inline segment.
    pub fn push(&mut self, inline: Inline) {
        self.content.push(inline);
    }

    /// Get the plain text of the line (link targets and heading marks omitted).
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => text.as_str(),
                Inline::Heading { text, .. } => text.as_str(),
                Inline::Link { text, .. } => text.as_str(),
            })
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Check if the line has no visible content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().is_empty()
    }

    /// Check if this line is a list item.
    pub fn is_list_item(&self) -> bool {
        self.indent.is_some()
    }

    /// Get the level of the first heading span on this line, if any.
    pub fn heading_level(&self) -> Option<u8> {
        self.content.iter().find_map(|inline| match inline {
            Inline::Heading { level, .. } => Some(*level),
            _ => None,
        })
    }

    /// Check if the line contains any links.
    pub fn has_links(&self) -> bool {
        self.content
            .iter()
            .any(|inline| matches!(inline, Inline::Link { .. }))
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a line.
///
/// Adjacently tagged so the plain-text variant serializes as a tagged value;
/// an internal tag cannot carry a bare string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    /// A run of plain text
    Text(String),

    /// A heading span with a visual emphasis level.
    ///
    /// Level 1 is the smallest emphasis and maps to the deepest Markdown
    /// heading (five `#`); level 5 maps to a single `#`.
    Heading {
        /// Emphasis level (1-5)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A hyperlink
    Link {
        /// Visible text
        text: String,
        /// Target URL
        url: String,
        /// Source URL of an embedded image, if the link wraps one
        image: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_text_merges_runs() {
        let mut line = Line::new();
        line.push_text("Hello ");
        line.push_text("world");
        assert_eq!(line.content.len(), 1);
        assert_eq!(line.plain_text(), "Hello world");
    }

    #[test]
    fn test_push_text_ignores_empty() {
        let mut line = Line::new();
        line.push_text("");
        assert!(line.content.is_empty());
    }

    #[test]
    fn test_heading_level() {
        let line = Line::heading("Intro", 1);
        assert_eq!(line.heading_level(), Some(1));
        assert!(!line.is_empty());

        let plain = Line::with_text("not a heading");
        assert_eq!(plain.heading_level(), None);
    }

    #[test]
    fn test_heading_level_clamped() {
        let line = Line::heading("Too big", 9);
        assert_eq!(line.heading_level(), Some(5));
    }

    #[test]
    fn test_list_item() {
        let line = Line::with_text("item").with_indent(2);
        assert!(line.is_list_item());
        assert_eq!(line.indent, Some(2));
    }

    #[test]
    fn test_plain_text_with_link() {
        let mut line = Line::with_text("see ");
        line.push(Inline::Link {
            text: "here".to_string(),
            url: "https://example.com".to_string(),
            image: None,
        });
        assert_eq!(line.plain_text(), "see here");
        assert!(line.has_links());
    }

    #[test]
    fn test_whitespace_only_line_is_empty() {
        let line = Line::with_text("   ");
        assert!(line.is_empty());
    }
}
