//! Writing assembled documents to disk.
//!
//! The output filename is derived from the document's title line. Titles come
//! from user-authored pages and can contain path separators or characters
//! that some filesystems reject, so they are sanitized before use.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Derive the title from an assembled document's first line.
pub fn derive_title(markdown: &str) -> Option<&str> {
    markdown.lines().next()?.strip_prefix("# ")
}

/// Sanitize a page title for use as a filename.
///
/// Path separators, reserved characters, and control characters become `_`,
/// and leading dots are replaced so the file cannot come out hidden. The
/// result may be empty for titles made entirely of whitespace.
pub fn sanitize_filename(title: &str) -> String {
    let name: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let stripped = name.trim_start_matches('.');
    let leading_dots = name.len() - stripped.len();
    format!("{}{}", "_".repeat(leading_dots), stripped)
}

/// Write an assembled Markdown document into `dir` as `{title}.md`.
///
/// The directory is created if absent. Returns the path of the written file.
pub fn save_markdown(markdown: &str, dir: &Path) -> Result<PathBuf> {
    let title = derive_title(markdown).ok_or(Error::MissingTitle)?;
    let filename = sanitize_filename(title);
    if filename.is_empty() {
        return Err(Error::EmptyTitle);
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{filename}.md"));
    fs::write(&path, markdown)?;
    debug!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("# Demo\n\nbody"), Some("Demo"));
        assert_eq!(derive_title("Demo\n"), None);
        assert_eq!(derive_title(""), None);
    }

    #[test]
    fn test_sanitize_plain_title() {
        assert_eq!(sanitize_filename("Demo"), "Demo");
        assert_eq!(sanitize_filename("  Demo  "), "Demo");
    }

    #[test]
    fn test_sanitize_reserved_characters() {
        assert_eq!(sanitize_filename("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_filename("what?"), "what_");
        assert_eq!(sanitize_filename("../../etc/passwd"), "___.._etc_passwd");
    }

    #[test]
    fn test_sanitize_leading_dots() {
        assert_eq!(sanitize_filename(".hidden"), "_hidden");
        assert_eq!(sanitize_filename("..."), "___");
    }

    #[test]
    fn test_sanitize_empty_title() {
        assert_eq!(sanitize_filename("   "), "");
    }

    #[test]
    fn test_save_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("notes");

        let path = save_markdown("# Demo\n\nHello\n", &out).unwrap();
        assert_eq!(path, out.join("Demo.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Demo\n\nHello\n");

        // Writing again into the existing directory is fine
        save_markdown("# Demo\n\nAgain\n", &out).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Demo\n\nAgain\n");
    }

    #[test]
    fn test_save_markdown_without_title_line() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_markdown("no title here", dir.path()).unwrap_err();
        assert!(matches!(err, Error::MissingTitle));
    }

    #[test]
    fn test_save_markdown_with_unusable_title() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_markdown("#  \n", dir.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyTitle));
    }
}
