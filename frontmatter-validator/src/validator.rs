//! Per-document validation and the sequential run over a path list.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::DocumentError;
use crate::frontmatter::{extract_frontmatter, parse_frontmatter};
use crate::report::ValidationReport;
use crate::strategy::fs::read_file_bounded;
use crate::tags::TagTable;

/// Validate already-read document content.
///
/// Returns the invalid-tag lines (possibly empty) for a document with
/// well-formed frontmatter.
///
/// # Errors
///
/// Returns [`DocumentError::MissingFrontmatter`] if there is no delimited
/// block, or [`DocumentError::Parse`] if the block is not a YAML mapping.
pub fn validate_content(content: &str, table: &TagTable) -> Result<Vec<String>, DocumentError> {
    let block = extract_frontmatter(content).ok_or(DocumentError::MissingFrontmatter)?;
    let frontmatter = parse_frontmatter(block)?;
    debug!(fields = frontmatter.field_count(), "parsed frontmatter");
    Ok(table.check(&frontmatter))
}

/// Read and validate a single document.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read, otherwise the
/// errors of [`validate_content`].
pub fn validate_document(
    path: &Path,
    table: &TagTable,
    max_file_size: u64,
) -> Result<Vec<String>, DocumentError> {
    let content = read_file_bounded(path, max_file_size)?;
    validate_content(&content, table)
}

/// Validate every path and collect the findings.
///
/// Documents are validated one at a time; a failure only affects its own
/// document.
#[must_use]
pub fn run_validation(paths: &[PathBuf], table: &TagTable, max_file_size: u64) -> ValidationReport {
    let mut report = ValidationReport::default();

    if paths.is_empty() {
        info!("No Markdown files to validate");
        return report;
    }

    for path in paths {
        debug!(path = %path.display(), "validating document");
        report.checked_files += 1;
        record_outcome(
            &mut report,
            path,
            validate_document(path, table, max_file_size),
        );
    }

    info!(
        checked = report.checked_files,
        malformed = report.malformed.len(),
        invalid_tags = report.tag_issues.len(),
        "validation finished"
    );
    report
}

/// File a single document's outcome into the matching report bucket.
pub fn record_outcome(
    report: &mut ValidationReport,
    path: &Path,
    outcome: Result<Vec<String>, DocumentError>,
) {
    match outcome {
        Ok(issues) if issues.is_empty() => {}
        Ok(issues) => {
            debug!(path = %path.display(), count = issues.len(), "invalid tag values");
            report.tag_issues.insert(path.to_path_buf(), issues);
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid frontmatter");
            report
                .malformed
                .insert(path.to_path_buf(), err.report_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TagTable {
        TagTable::from_json_str(r#"{"license": ["MIT", "Apache-2.0"]}"#).unwrap()
    }

    #[test]
    fn test_validate_content_clean() {
        let issues = validate_content("---\nlicense: MIT\n---\nbody", &table()).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_validate_content_missing() {
        assert_eq!(
            validate_content("# no frontmatter", &table()),
            Err(DocumentError::MissingFrontmatter)
        );
    }

    #[test]
    fn test_validate_content_parse_error_skips_tags() {
        let result = validate_content("---\nlicense: GPL: 3\n---\n", &table());
        assert!(matches!(result, Err(DocumentError::Parse(_))), "got: {result:?}");
    }

    #[test]
    fn test_record_outcome_buckets() {
        let mut report = ValidationReport::default();
        record_outcome(&mut report, Path::new("ok.md"), Ok(vec![]));
        record_outcome(
            &mut report,
            Path::new("bad.md"),
            Ok(vec!["**license**: X".to_owned()]),
        );
        record_outcome(
            &mut report,
            Path::new("none.md"),
            Err(DocumentError::MissingFrontmatter),
        );

        assert_eq!(report.tag_issues.len(), 1);
        assert_eq!(report.malformed.len(), 1);
        assert!(!report.tag_issues.contains_key(Path::new("ok.md")));
        assert_eq!(
            report.malformed.get(Path::new("none.md")).map(String::as_str),
            Some("Error: No frontmatter found or it is in an invalid format.")
        );
    }

    #[test]
    fn test_run_validation_empty_paths() {
        let report = run_validation(&[], &table(), 1024);
        assert!(report.is_empty());
        assert_eq!(report.checked_files, 0);
    }
}
