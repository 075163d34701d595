//! JSON rendering for captured pages.

use crate::error::{Error, Result};
use crate::model::Page;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize the page model to JSON.
pub fn to_json(page: &Page, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(page),
        JsonFormat::Compact => serde_json::to_string(page),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
