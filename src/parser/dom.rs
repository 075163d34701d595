//! Captured DOM tree built from an HTML snapshot.
//!
//! The page transcoder never touches a live browser. Instead the snapshot is
//! parsed once into this lightweight tree (tag, attributes, children, text)
//! and everything downstream is a pure function over it. Trees can also be
//! constructed directly, which keeps parser tests independent of HTML.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::Result;

/// A node in the captured tree: an element or a text run.
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    /// An element with tag, attributes, and children
    Element(DomElement),

    /// A text run
    Text(String),
}

/// An element in the captured tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Lowercase tag name (`"#document"` for the tree root)
    pub tag: String,

    /// Attributes in source order
    pub attrs: Vec<(String, String)>,

    /// Child nodes in source order
    pub children: Vec<DomNode>,
}

impl DomElement {
    /// Create a new element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(DomNode::Element(child));
        self
    }

    /// Add a text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(DomNode::Text(text.into()));
        self
    }

    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the element's class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    /// Check whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Find the first class starting with `prefix` and return the remainder.
    ///
    /// `class_suffix("level-")` on `class="deco strong level-3"` yields `"3"`.
    pub fn class_suffix(&self, prefix: &str) -> Option<&str> {
        self.classes().find_map(|c| c.strip_prefix(prefix))
    }

    /// Find the first descendant element with the given class, depth-first.
    ///
    /// Matches descendants only, like `querySelector` on this element.
    pub fn find_class(&self, class: &str) -> Option<&DomElement> {
        for child in &self.children {
            if let DomNode::Element(el) = child {
                if el.has_class(class) {
                    return Some(el);
                }
                if let Some(found) = el.find_class(class) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Find the first descendant element with the given tag, depth-first.
    pub fn find_tag(&self, tag: &str) -> Option<&DomElement> {
        for child in &self.children {
            if let DomNode::Element(el) = child {
                if el.tag == tag {
                    return Some(el);
                }
                if let Some(found) = el.find_tag(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Find all descendant elements with the given class, in document order.
    pub fn find_all_class(&self, class: &str) -> Vec<&DomElement> {
        let mut found = Vec::new();
        self.collect_class(class, &mut found);
        found
    }

    fn collect_class<'a>(&'a self, class: &str, found: &mut Vec<&'a DomElement>) {
        for child in &self.children {
            if let DomNode::Element(el) = child {
                if el.has_class(class) {
                    found.push(el);
                }
                el.collect_class(class, found);
            }
        }
    }

    /// Concatenated text of all text descendants, in document order.
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                DomNode::Text(text) => out.push_str(text),
                DomNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

/// Parse an HTML snapshot into a captured tree rooted at `#document`.
pub fn parse_html(html: &str) -> Result<DomElement> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?;
    Ok(capture(&dom.document))
}

/// Convert an rcdom handle into the owned tree.
fn capture(handle: &Handle) -> DomElement {
    let mut element = match &handle.data {
        NodeData::Document => DomElement::new("#document"),
        NodeData::Element { name, attrs, .. } => {
            let mut el = DomElement::new(name.local.to_string());
            for attr in attrs.borrow().iter() {
                el.attrs
                    .push((attr.name.local.to_string(), attr.value.to_string()));
            }
            el
        }
        _ => DomElement::new("#document"),
    };

    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                element
                    .children
                    .push(DomNode::Text(contents.borrow().to_string()));
            }
            NodeData::Element { .. } => {
                element.children.push(DomNode::Element(capture(child)));
            }
            // Comments, doctypes, and processing instructions carry no content
            _ => {}
        }
    }

    element
}
