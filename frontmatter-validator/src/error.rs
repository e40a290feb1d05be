//! Error types for frontmatter validation.

use std::path::PathBuf;

use thiserror::Error;

/// Message recorded when a document has no `---` delimited block.
pub const MISSING_FRONTMATTER_MESSAGE: &str =
    "No frontmatter found or it is in an invalid format.";

/// A per-document failure that prevents tag checking.
///
/// Every variant ends up in the malformed-frontmatter bucket of the report as
/// `Error: <message>`. None of them aborts the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    /// The document could not be read (missing, too large, not UTF-8, ...).
    #[error("{0}")]
    Read(String),
    /// A frontmatter block was found but is not a well-formed YAML mapping.
    #[error("{0}")]
    Parse(String),
    /// No frontmatter block was found at the start of the document.
    #[error("{MISSING_FRONTMATTER_MESSAGE}")]
    MissingFrontmatter,
}

impl DocumentError {
    /// Format the error the way it is stored in the report.
    #[must_use]
    pub fn report_message(&self) -> String {
        format!("Error: {self}")
    }
}

/// Failure to load the reference tag table.
///
/// Unlike [`DocumentError`], this is fatal: there is nothing to validate
/// against without the table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TagTableError {
    #[error("failed to read tag table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON tag table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML tag table: {0}")]
    Yaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_frontmatter_report_message() {
        assert_eq!(
            DocumentError::MissingFrontmatter.report_message(),
            "Error: No frontmatter found or it is in an invalid format."
        );
    }

    #[test]
    fn test_read_and_parse_share_report_format() {
        let read = DocumentError::Read("Failed to open file: not found".to_owned());
        let parse = DocumentError::Parse("mapping values are not allowed".to_owned());
        assert_eq!(read.report_message(), "Error: Failed to open file: not found");
        assert_eq!(parse.report_message(), "Error: mapping values are not allowed");
    }

    #[test]
    fn test_tag_table_io_error_mentions_path() {
        let err = TagTableError::Io {
            path: PathBuf::from("tags.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("tags.json"), "got: {msg}");
        assert!(msg.contains("gone"), "got: {msg}");
    }
}
