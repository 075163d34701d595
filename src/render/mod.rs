//! Rendering module for converting the page model to output formats.

mod json;
mod markdown;
mod options;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
