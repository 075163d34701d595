//! # unscrap
//!
//! Converts captured Scrapbox pages to Markdown.
//!
//! Scrapbox renders a note as a flat list of line elements whose semantics
//! (headings, nested lists, links, inline code) live in presentation markup:
//! class names on inline spans and CSS widths on indentation markers. This
//! library parses an HTML snapshot of such a page into a structured model and
//! renders it back out as Markdown or JSON. Capturing the page (headless
//! browser, `curl`, "save as HTML") is the caller's job.
//!
//! ## Quick Start
//!
//! ```
//! use unscrap::{parse_str, render};
//!
//! fn main() -> unscrap::Result<()> {
//!     let html = r#"
//!         <div class="lines">
//!           <div class="line line-title"><span class="text">Demo</span></div>
//!           <div class="line"><span class="text">Hello</span></div>
//!         </div>
//!     "#;
//!     let page = parse_str(html)?;
//!
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&page, &options);
//!     assert_eq!(markdown, "# Demo\n\nHello\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure reconstruction**: headings, nested lists, links, image
//!   links, and inline code recovered from presentation markup
//! - **Multiple output formats**: Markdown and JSON
//! - **Browser-independent**: operates on a captured DOM tree, never a live page
//! - **Safe output naming**: page titles are sanitized before becoming filenames

pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Inline, Line, Page};
pub use output::{derive_title, sanitize_filename, save_markdown};
pub use parser::{DomElement, DomNode, HeadingMode, PageParser, ParseOptions};
pub use render::{JsonFormat, MarkdownRenderer, RenderOptions};

// Re-exported for callers configuring a base URL
pub use url;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse an HTML snapshot into a structured page.
///
/// # Example
///
/// ```
/// let html = r#"
///     <div class="lines">
///       <div class="line line-title"><span class="text">Demo</span></div>
///       <div class="line"><span class="text">Hello</span></div>
///     </div>
/// "#;
/// let page = unscrap::parse_str(html).unwrap();
/// assert_eq!(page.title, "Demo");
/// assert_eq!(page.line_count(), 1);
/// ```
pub fn parse_str(html: &str) -> Result<Page> {
    PageParser::new().parse(html)
}

/// Parse an HTML snapshot with custom options.
pub fn parse_str_with_options(html: &str, options: ParseOptions) -> Result<Page> {
    PageParser::with_options(options).parse(html)
}

/// Parse a snapshot file into a structured page.
///
/// # Example
///
/// ```no_run
/// let page = unscrap::parse_file("page.html").unwrap();
/// println!("{} lines", page.line_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Page> {
    let html = fs::read_to_string(path)?;
    parse_str(&html)
}

/// Parse a snapshot file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Page> {
    let html = fs::read_to_string(path)?;
    parse_str_with_options(&html, options)
}

/// Parse a snapshot from a reader.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// let file = File::open("page.html").unwrap();
/// let page = unscrap::parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Page> {
    let mut html = String::new();
    reader.read_to_string(&mut html)?;
    parse_str(&html)
}

/// Parse a snapshot from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Page> {
    let mut html = String::new();
    reader.read_to_string(&mut html)?;
    parse_str_with_options(&html, options)
}

/// Convert a snapshot file to Markdown with default options.
///
/// # Example
///
/// ```no_run
/// let markdown = unscrap::to_markdown("page.html").unwrap();
/// std::fs::write("page.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let page = parse_file(path)?;
    Ok(render::to_markdown(&page, &RenderOptions::default()))
}

/// Builder for parsing and converting captured pages.
///
/// # Example
///
/// ```
/// use unscrap::Unscrap;
///
/// let html = r#"
///     <div class="lines">
///       <div class="line line-title"><span class="text">Demo</span></div>
///       <div class="line"><span class="text">Hello</span></div>
///     </div>
/// "#;
/// let markdown = Unscrap::new()
///     .with_list_marker('-')
///     .parse_str(html)?
///     .to_markdown();
/// assert!(markdown.starts_with("# Demo"));
/// # Ok::<(), unscrap::Error>(())
/// ```
pub struct Unscrap {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unscrap {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on heading spans with a malformed level class.
    pub fn strict_headings(mut self) -> Self {
        self.parse_options = self.parse_options.strict_headings();
        self
    }

    /// Set the base URL for resolving relative links.
    pub fn with_base_url(mut self, base: url::Url) -> Self {
        self.parse_options = self.parse_options.with_base_url(base);
        self
    }

    /// Set the indentation unit width in em.
    pub fn with_indent_unit(mut self, em: f32) -> Self {
        self.parse_options = self.parse_options.with_indent_unit(em);
        self
    }

    /// Set the number of spaces per list nesting level in the output.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.render_options = self.render_options.with_indent_width(width);
        self
    }

    /// Set the list marker character in the output.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Parse an HTML snapshot and return a result wrapper.
    pub fn parse_str(self, html: &str) -> Result<UnscrapResult> {
        let page = PageParser::with_options(self.parse_options).parse(html)?;
        Ok(UnscrapResult {
            page,
            render_options: self.render_options,
        })
    }

    /// Parse a snapshot file and return a result wrapper.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<UnscrapResult> {
        let html = fs::read_to_string(path)?;
        self.parse_str(&html)
    }
}

impl Default for Unscrap {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a captured page.
pub struct UnscrapResult {
    /// The parsed page
    pub page: Page,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnscrapResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.page, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.page, format)
    }

    /// Render to Markdown and write `{title}.md` into `dir`.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let markdown = self.to_markdown();
        output::save_markdown(&markdown, dir.as_ref())
    }

    /// Get the parsed page.
    pub fn page(&self) -> &Page {
        &self.page
    }
}
