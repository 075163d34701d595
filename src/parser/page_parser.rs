//! Page parser: captured DOM tree to page model.
//!
//! The editor renders one `.lines` container holding a `.line-title` line and
//! one `.line` element per content line. Each line's `.text` element carries
//! the inline content: zero-width filler spans (`empty-char-index`), inline
//! code delimiters (`backquote`), heading spans (`strong.level-N`), anchors,
//! and an `.indent-mark` whose CSS width encodes list nesting. This parser
//! reconstructs the semantic structure from that presentation markup.

use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Inline, Line, Page};

use super::dom::{parse_html, DomElement, DomNode};
use super::options::{HeadingMode, ParseOptions};

/// Marker widths are inline styles of the form `width: 4.5em`.
static WIDTH_EM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"width:\s*([0-9.]+)em").unwrap());

/// Parses a captured page into a [`Page`].
pub struct PageParser {
    options: ParseOptions,
}

impl PageParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse an HTML snapshot.
    pub fn parse(&self, html: &str) -> Result<Page> {
        let root = parse_html(html)?;
        self.parse_dom(&root)
    }

    /// Parse an already-captured DOM tree.
    ///
    /// The first `.line` element is the title line; it supplies the page
    /// title and is excluded from the body.
    pub fn parse_dom(&self, root: &DomElement) -> Result<Page> {
        let lines_el = root
            .find_class("lines")
            .ok_or(Error::MissingElement(".lines"))?;

        let title_el = lines_el
            .find_class("line-title")
            .and_then(|el| el.find_class("text"))
            .ok_or(Error::MissingElement(".line-title .text"))?;
        let title = clean_text(&title_el.inner_text()).trim().to_string();

        let mut page = Page::new(title);
        for line_el in lines_el.find_all_class("line").into_iter().skip(1) {
            page.add_line(self.parse_line(line_el)?);
        }
        Ok(page)
    }

    fn parse_line(&self, line_el: &DomElement) -> Result<Line> {
        let text_el = line_el
            .find_class("text")
            .ok_or(Error::MissingElement(".line .text"))?;

        let mut line = Line::new();
        self.collect_children(text_el, &mut line)?;
        line.indent = self.indent_level(text_el)?;
        Ok(line)
    }

    fn collect_children(&self, el: &DomElement, line: &mut Line) -> Result<()> {
        for child in &el.children {
            match child {
                DomNode::Text(text) => line.push_text(clean_text(text)),
                DomNode::Element(child_el) => self.collect_element(child_el, line)?,
            }
        }
        Ok(())
    }

    fn collect_element(&self, el: &DomElement, line: &mut Line) -> Result<()> {
        // Zero-width filler spans carry no content
        if el.has_class("empty-char-index") {
            return Ok(());
        }
        // Backquote delimiter spans become literal backticks, restoring
        // inline code syntax
        if el.has_class("backquote") {
            line.push_text("`");
            return Ok(());
        }

        match el.tag.as_str() {
            // Line breaks are dropped; a bare img outside an anchor does not
            // survive plain-text serialization
            "br" | "img" => Ok(()),
            "a" => {
                line.push(self.link_inline(el));
                Ok(())
            }
            "strong" => self.collect_strong(el, line),
            // Any other wrapper is flattened: children kept, markup discarded
            _ => self.collect_children(el, line),
        }
    }

    /// A `strong` with a `level-N` class is a heading span. A `strong`
    /// without one is ordinary bold text and is always flattened; only a
    /// malformed level class is subject to the heading mode.
    fn collect_strong(&self, el: &DomElement, line: &mut Line) -> Result<()> {
        let Some(suffix) = el.class_suffix("level-") else {
            return self.collect_children(el, line);
        };

        match suffix.parse::<u8>() {
            Ok(level @ 1..=5) => {
                line.push(Inline::Heading {
                    level,
                    text: clean_text(&el.inner_text()).trim().to_string(),
                });
                Ok(())
            }
            _ => match self.options.heading_mode {
                HeadingMode::Lenient => {
                    warn!("heading span with malformed level class {suffix:?}; treating as text");
                    self.collect_children(el, line)
                }
                HeadingMode::Strict => Err(Error::InvalidHeadingLevel(
                    el.attr("class").unwrap_or_default().to_string(),
                )),
            },
        }
    }

    fn link_inline(&self, el: &DomElement) -> Inline {
        let text = clean_text(&el.inner_text()).trim().to_string();
        let url = self.resolve(el.attr("href").unwrap_or_default());
        let image = el
            .find_tag("img")
            .and_then(|img| img.attr("src"))
            .map(|src| self.resolve(src));

        Inline::Link { text, url, image }
    }

    /// Resolve an href or image src against the configured base URL.
    /// Without a base URL the value passes through verbatim.
    fn resolve(&self, href: &str) -> String {
        let Some(base) = &self.options.base_url else {
            return href.to_string();
        };
        match base.join(href) {
            Ok(url) => url.to_string(),
            Err(err) => {
                warn!("could not resolve {href:?} against base URL: {err}");
                href.to_string()
            }
        }
    }

    /// List nesting level from the indentation marker's CSS width.
    ///
    /// The editor renders one unit of nesting as 1.5em of marker width. A
    /// marker without a readable width is level 0 (a bullet with no indent).
    fn indent_level(&self, text_el: &DomElement) -> Result<Option<u8>> {
        let Some(mark) = text_el.find_class("indent-mark") else {
            return Ok(None);
        };
        let Some(style) = mark.attr("style") else {
            return Ok(Some(0));
        };
        let Some(caps) = WIDTH_EM.captures(style) else {
            return Ok(Some(0));
        };

        let width: f32 = caps[1]
            .parse()
            .map_err(|_| Error::InvalidIndent(style.to_string()))?;
        let quotient = width / self.options.indent_unit_em;
        let level = quotient.round();
        if (quotient - level).abs() > 0.01 {
            warn!(
                "indent width {width}em is not a multiple of {}em; rounding to level {level}",
                self.options.indent_unit_em
            );
        }
        Ok(Some(level as u8))
    }
}

impl Default for PageParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove tab and newline characters introduced by markup pretty-printing.
fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn text_span(content: DomElement) -> DomElement {
        DomElement::new("div")
            .with_attr("class", "line")
            .with_child(content)
    }

    fn page_with_lines(lines: Vec<DomElement>) -> DomElement {
        let mut container = DomElement::new("div")
            .with_attr("class", "lines")
            .with_child(
                DomElement::new("div")
                    .with_attr("class", "line line-title")
                    .with_child(
                        DomElement::new("span")
                            .with_attr("class", "text")
                            .with_text("Demo"),
                    ),
            );
        for line in lines {
            container = container.with_child(line);
        }
        DomElement::new("#document").with_child(container)
    }

    fn plain_line(text: &str) -> DomElement {
        text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_text(text),
        )
    }

    #[test]
    fn test_title_and_body_split() {
        let root = page_with_lines(vec![plain_line("Hello")]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.title, "Demo");
        assert_eq!(page.line_count(), 1);
        assert_eq!(page.lines[0].plain_text(), "Hello");
    }

    #[test]
    fn test_missing_lines_container() {
        let root = DomElement::new("#document").with_child(DomElement::new("body"));
        let err = PageParser::new().parse_dom(&root).unwrap_err();
        assert!(matches!(err, Error::MissingElement(".lines")));
    }

    #[test]
    fn test_missing_text_child() {
        let bad_line = DomElement::new("div").with_attr("class", "line");
        let root = page_with_lines(vec![bad_line]);
        let err = PageParser::new().parse_dom(&root).unwrap_err();
        assert!(matches!(err, Error::MissingElement(".line .text")));
    }

    #[test]
    fn test_empty_char_spans_dropped() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_text("a")
                .with_child(
                    DomElement::new("span")
                        .with_attr("class", "empty-char-index")
                        .with_text("   "),
                )
                .with_text("b"),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].plain_text(), "ab");
    }

    #[test]
    fn test_backquote_spans_become_backticks() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("span")
                        .with_attr("class", "backquote")
                        .with_text("`"),
                )
                .with_child(
                    DomElement::new("span")
                        .with_attr("class", "code")
                        .with_text("ls -la"),
                )
                .with_child(
                    DomElement::new("span")
                        .with_attr("class", "backquote")
                        .with_text("`"),
                ),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].plain_text(), "`ls -la`");
    }

    #[test]
    fn test_heading_span() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("strong")
                        .with_attr("class", "level-2")
                        .with_text("Section"),
                ),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].heading_level(), Some(2));
        assert_eq!(page.lines[0].plain_text(), "Section");
    }

    #[test]
    fn test_plain_strong_flattened() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(DomElement::new("strong").with_text("bold")),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].heading_level(), None);
        assert_eq!(page.lines[0].plain_text(), "bold");
    }

    #[test]
    fn test_malformed_heading_level_lenient() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("strong")
                        .with_attr("class", "level-x")
                        .with_text("not a heading"),
                ),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].heading_level(), None);
        assert_eq!(page.lines[0].plain_text(), "not a heading");
    }

    #[test]
    fn test_level_less_strong_flattened_in_strict_mode() {
        // A strong with no level- class is ordinary bold, not a malformed
        // heading; strict mode leaves it alone
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(DomElement::new("strong").with_text("bold")),
        )]);
        let parser = PageParser::with_options(ParseOptions::new().strict_headings());
        let page = parser.parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].heading_level(), None);
        assert_eq!(page.lines[0].plain_text(), "bold");
    }

    #[test]
    fn test_malformed_heading_level_strict() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("strong")
                        .with_attr("class", "level-x")
                        .with_text("boom"),
                ),
        )]);
        let parser = PageParser::with_options(ParseOptions::new().strict_headings());
        let err = parser.parse_dom(&root).unwrap_err();
        assert!(matches!(err, Error::InvalidHeadingLevel(_)));
    }

    #[test]
    fn test_link_without_image() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("a")
                        .with_attr("href", "https://example.com")
                        .with_text("  example  "),
                ),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        match &page.lines[0].content[0] {
            Inline::Link { text, url, image } => {
                assert_eq!(text, "example");
                assert_eq!(url, "https://example.com");
                assert!(image.is_none());
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_link_with_image() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("a")
                        .with_attr("href", "https://gyazo.com/abc")
                        .with_child(
                            DomElement::new("img")
                                .with_attr("src", "https://i.gyazo.com/abc.png"),
                        ),
                ),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        match &page.lines[0].content[0] {
            Inline::Link { image, .. } => {
                assert_eq!(image.as_deref(), Some("https://i.gyazo.com/abc.png"));
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_relative_link_resolved_against_base() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("a")
                        .with_attr("href", "/project/other-page")
                        .with_text("other"),
                ),
        )]);
        let base = Url::parse("https://scrapbox.io/project/demo").unwrap();
        let parser = PageParser::with_options(ParseOptions::new().with_base_url(base));
        let page = parser.parse_dom(&root).unwrap();
        match &page.lines[0].content[0] {
            Inline::Link { url, .. } => {
                assert_eq!(url, "https://scrapbox.io/project/other-page");
            }
            other => panic!("expected link, got {:?}", other),
        }
    }

    #[test]
    fn test_indent_levels() {
        let bullet = |width: &str| {
            text_span(
                DomElement::new("span")
                    .with_attr("class", "text")
                    .with_child(
                        DomElement::new("span")
                            .with_attr("class", "indent-mark")
                            .with_attr("style", format!("width: {width}")),
                    )
                    .with_text("item"),
            )
        };
        let root = page_with_lines(vec![bullet("1.5em"), bullet("3em"), bullet("4.5em")]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].indent, Some(1));
        assert_eq!(page.lines[1].indent, Some(2));
        assert_eq!(page.lines[2].indent, Some(3));
    }

    #[test]
    fn test_indent_mark_without_width() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_child(
                    DomElement::new("span").with_attr("class", "indent-mark"),
                )
                .with_text("item"),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].indent, Some(0));
    }

    #[test]
    fn test_no_indent_mark() {
        let root = page_with_lines(vec![plain_line("prose")]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].indent, None);
    }

    #[test]
    fn test_br_and_whitespace_stripped() {
        let root = page_with_lines(vec![text_span(
            DomElement::new("span")
                .with_attr("class", "text")
                .with_text("a\n\tb")
                .with_child(DomElement::new("br")),
        )]);
        let page = PageParser::new().parse_dom(&root).unwrap();
        assert_eq!(page.lines[0].plain_text(), "ab");
    }

    #[test]
    fn test_parse_html_snapshot() {
        let html = r#"
            <div class="lines">
              <div class="line line-title"><span class="text">Demo</span></div>
              <div class="line"><span class="text">Hello</span></div>
            </div>
        "#;
        let page = PageParser::new().parse(html).unwrap();
        assert_eq!(page.title, "Demo");
        assert_eq!(page.lines[0].plain_text(), "Hello");
    }
}
