//! Markdown rendering for captured pages.

use crate::model::{Inline, Line, Page};

use super::RenderOptions;

/// Convert a page to a Markdown document.
pub fn to_markdown(page: &Page, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(page)
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

    /// Render a page to a Markdown document.
    ///
    /// The document opens with `# {title}` and each body line contributes one
    /// fragment, separated by a newline, in rendered order. Empty lines
    /// contribute empty fragments, which read back as blank separators.
    pub fn render(&self, page: &Page) -> String {
        let mut output = format!("# {}\n", page.title);
        for line in &page.lines {
            output.push('\n');
            output.push_str(&self.render_line(line));
        }
        output
    }

    /// Render one line to its Markdown fragment.
    fn render_line(&self, line: &Line) -> String {
        let mut text = String::new();
        for inline in &line.content {
            self.render_inline(&mut text, inline);
        }
        let text = text.trim();

        if let Some(level) = line.indent {
            let indent = self.options.indent_width * usize::from(level.saturating_sub(1));
            return format!("{}{} {}", " ".repeat(indent), self.options.list_marker, text);
        }

        // A bare paragraph gets a trailing blank line; headings and empty
        // lines do not
        if !text.is_empty() && !text.starts_with('#') {
            return format!("{text}\n");
        }
        text.to_string()
    }

    fn render_inline(&self, output: &mut String, inline: &Inline) {
        match inline {
            Inline::Text(text) => output.push_str(text),
            Inline::Heading { level, text } => {
                output.push_str(&heading_marks(*level));
                output.push(' ');
                output.push_str(text);
            }
            Inline::Link { text, url, image } => match image {
                Some(src) => output.push_str(&format!("[![Image]({src})]({url})")),
                None => output.push_str(&format!("[{text}]({url})")),
            },
        }
    }
}

/// Markdown heading marks for a heading span level.
///
/// Level 1 is the smallest visual emphasis and maps to the most `#`
/// characters: level L yields `6 - L` marks.
fn heading_marks(level: u8) -> String {
    "#".repeat(6usize.saturating_sub(usize::from(level.clamp(1, 5))))
}
