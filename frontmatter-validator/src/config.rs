//! Configuration types for frontmatter validation.
//!
//! Split into source config (which documents to read) and report config (how
//! findings are rendered). The reference tag table lives in [`crate::tags`].

use std::collections::HashSet;
use std::path::PathBuf;

/// Environment variable carrying the whitespace-separated changed-files list.
pub const CHANGED_FILES_ENV: &str = "CHANGED_FILES";

/// Default location of the reference tag table.
pub const DEFAULT_TAGS_FILE: &str = ".github/actions/validTagsList.json";

/// Published tag list linked from the invalid-tags section of the report.
pub const DEFAULT_TAG_LIST_URL: &str =
    "https://github.com/JaneliaSciComp/ossi-website/tree/main/.github/actions/validTagsList.json";

/// Default location of the generated report.
pub const DEFAULT_REPORT_FILE: &str = "validation-report.md";

/// Document source options.
///
/// `paths` may be empty: an empty changed-files list is a valid run that
/// simply has nothing to report.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SourceConfig {
    /// Files to validate. Directories are walked for Markdown files.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), applied to discovered and explicit paths.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links while walking directories.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}

impl SourceConfig {
    /// Build a source config from a changed-files list such as `$CHANGED_FILES`.
    #[must_use]
    pub fn from_changed_files(list: &str) -> Self {
        Self {
            paths: split_changed_files(list),
            ..Self::default()
        }
    }
}

/// Report rendering options.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ReportConfig {
    /// Link to the maintained tag list, shown in the invalid-tags section.
    pub tag_list_url: Option<String>,
}

/// Split a whitespace-separated path list, dropping blanks and repeats.
///
/// First occurrence wins so the caller's order is kept.
#[must_use]
pub fn split_changed_files(list: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    list.split_whitespace()
        .filter(|p| seen.insert(*p))
        .map(PathBuf::from)
        .collect()
}
