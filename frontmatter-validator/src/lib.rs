//! # frontmatter-validator
//!
//! Validates the YAML frontmatter of Markdown files against an allow-list of
//! tag categories and values, and renders a Markdown report for CI.
//!
//! The core (`run_validation`) takes a list of paths and a [`TagTable`]; the
//! filesystem strategy (`validate_fs`) resolves directories and exclude
//! patterns first.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use frontmatter_validator::{ReportConfig, SourceConfig, TagTable, validate_fs};
//! use frontmatter_validator::output::write_report_file;
//!
//! let table = TagTable::load(Path::new(".github/actions/validTagsList.json")).unwrap();
//! let source = SourceConfig::from_changed_files("src/content/projects/demo.md");
//!
//! let report = validate_fs(&source, &table).unwrap();
//! println!("Files checked: {}", report.checked_files);
//! println!("Invalid frontmatter: {}", report.malformed.len());
//! println!("Invalid tags: {}", report.tag_issues.len());
//!
//! write_report_file(&report, &ReportConfig::default(), Path::new("validation-report.md")).unwrap();
//! ```

mod config;
mod error;
mod frontmatter;
pub mod output;
mod report;
mod strategy;
mod tags;
mod validator;

pub use config::{
    CHANGED_FILES_ENV, DEFAULT_REPORT_FILE, DEFAULT_TAG_LIST_URL, DEFAULT_TAGS_FILE, ReportConfig,
    SourceConfig, split_changed_files,
};
pub use error::{DocumentError, MISSING_FRONTMATTER_MESSAGE, TagTableError};
pub use frontmatter::{Frontmatter, extract_frontmatter, parse_frontmatter};
pub use report::ValidationReport;
pub use tags::{TagTable, TagValue, format_issue};
pub use validator::{run_validation, validate_content, validate_document};

use strategy::fs::find_documents;
use validator::record_outcome;

/// Validate the documents named by `source` on disk.
///
/// Directories are walked for Markdown files; explicit file paths are checked
/// as given. An empty path list yields an empty report.
///
/// # Errors
///
/// Returns an error only for configuration problems (an invalid exclude glob).
/// Per-document failures are recorded in `report.malformed`.
pub fn validate_fs(source: &SourceConfig, table: &TagTable) -> anyhow::Result<ValidationReport> {
    let documents = find_documents(source)?;

    let mut report = run_validation(&documents.files, table, source.max_file_size);
    for (path, err) in documents.failures {
        report.checked_files += 1;
        record_outcome(&mut report, &path, Err(err));
    }

    Ok(report)
}
