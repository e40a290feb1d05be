//! Validation report types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Result of a validation run.
///
/// Both maps are keyed by document path, so the report does not depend on the
/// order documents were validated in. A path is in at most one of them.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of documents attempted.
    pub checked_files: usize,
    /// Documents whose frontmatter is missing or could not be read/parsed,
    /// with the `Error: ...` message.
    pub malformed: BTreeMap<PathBuf, String>,
    /// Documents with tag values outside the allow-list, one line per category.
    pub tag_issues: BTreeMap<PathBuf, Vec<String>>,
}

impl ValidationReport {
    /// Whether there is nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.malformed.is_empty() && self.tag_issues.is_empty()
    }

    /// Number of documents with at least one finding.
    #[must_use]
    pub fn files_with_issues(&self) -> usize {
        self.malformed.len() + self.tag_issues.len()
    }

    /// Total number of invalid-tag lines across all documents.
    #[must_use]
    pub fn tag_issue_count(&self) -> usize {
        self.tag_issues.values().map(Vec::len).sum()
    }
}
