//! Parsing options and configuration.

use url::Url;

/// Width of one indentation unit in em, as rendered by the editor.
pub const INDENT_UNIT_EM: f32 = 1.5;

/// Options for parsing captured pages.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How to treat heading spans with a missing or malformed level class
    pub heading_mode: HeadingMode,

    /// Width of one indentation unit in em
    pub indent_unit_em: f32,

    /// Base URL for resolving relative hrefs and image sources.
    ///
    /// A live browser hands out absolute URLs; a static snapshot may not.
    pub base_url: Option<Url>,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading mode.
    pub fn with_heading_mode(mut self, mode: HeadingMode) -> Self {
        self.heading_mode = mode;
        self
    }

    /// Fail on heading spans with a malformed level class.
    pub fn strict_headings(mut self) -> Self {
        self.heading_mode = HeadingMode::Strict;
        self
    }

    /// Set the indentation unit width in em.
    pub fn with_indent_unit(mut self, em: f32) -> Self {
        self.indent_unit_em = em;
        self
    }

    /// Set the base URL for resolving relative links.
    pub fn with_base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            heading_mode: HeadingMode::Lenient,
            indent_unit_em: INDENT_UNIT_EM,
            base_url: None,
        }
    }
}

/// How to treat heading spans whose level class is missing or non-numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingMode {
    /// Flatten the span to plain text (default)
    #[default]
    Lenient,

    /// Fail with an error
    Strict,
}
