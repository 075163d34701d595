//! Snapshot parsing module.

mod dom;
mod options;
mod page_parser;

pub use dom::{parse_html, DomElement, DomNode};
pub use options::{HeadingMode, ParseOptions, INDENT_UNIT_EM};
pub use page_parser::PageParser;
