//! Page model types for captured Scrapbox content.
//!
//! This module defines the intermediate representation (IR) that bridges
//! snapshot parsing and Markdown rendering. The model is presentation-agnostic:
//! it knows about lines, nesting levels, headings, and links, but nothing about
//! the editor's class names or CSS.

mod line;
mod page;

pub use line::{Inline, Line};
pub use page::Page;
