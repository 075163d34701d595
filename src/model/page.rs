//! Page-level types.

use super::Line;
use serde::{Deserialize, Serialize};

/// A captured page: a title plus the body lines in rendered order.
///
/// The title line of the source page is not part of `lines`; it is carried
/// separately as `title`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page title, taken verbatim from the title line
    pub title: String,

    /// Body lines in rendered order
    pub lines: Vec<Line>,
}

impl Page {
    /// Create a new page with the given title and no body.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// Append a body line.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Number of body lines (empty lines included).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the page has no body content.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Number of list items in the body.
    pub fn list_item_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_list_item()).count()
    }

    /// Number of heading lines in the body.
    pub fn heading_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.heading_level().is_some())
            .count()
    }

    /// Number of lines containing at least one link.
    pub fn link_count(&self) -> usize {
        self.lines.iter().filter(|l| l.has_links()).count()
    }

    /// Plain text of the body, one line per body line.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
