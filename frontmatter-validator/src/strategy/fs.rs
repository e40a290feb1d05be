//! Filesystem document source.
//!
//! Resolves the configured paths into the list of documents to validate and
//! reads them safely:
//! - Explicit file paths are kept as given, even if they do not exist (the
//!   read failure is then reported against that path)
//! - Directories are walked for Markdown files, skipping build/vendor dirs
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Bounded reads prevent memory `DoS` on oversized files

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::SourceConfig;
use crate::error::DocumentError;

/// Directories to skip while walking.
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git", "vendor", "dist"];

/// Documents resolved from a [`SourceConfig`].
#[derive(Debug, Default)]
pub struct DocumentSet {
    /// Paths ready to validate, in discovery order.
    pub files: Vec<PathBuf>,
    /// Paths that failed during discovery (e.g. unreadable directories).
    pub failures: Vec<(PathBuf, DocumentError)>,
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

/// Check if file has a Markdown extension.
fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "markdown" | "mdx")
    )
}

/// Compile exclude globs.
///
/// # Errors
///
/// Returns an error naming the first pattern that does not parse.
pub fn compile_excludes(exclude: &[String]) -> anyhow::Result<Vec<Pattern>> {
    exclude
        .iter()
        .map(|pat_str| {
            Pattern::new(pat_str)
                .map_err(|e| anyhow::anyhow!("Invalid exclude glob pattern '{pat_str}': {e}"))
        })
        .collect()
}

/// Resolve the configured paths into documents to validate.
///
/// # Errors
///
/// Returns an error if an exclude pattern is not a valid glob.
pub fn find_documents(config: &SourceConfig) -> anyhow::Result<DocumentSet> {
    let exclude_patterns = compile_excludes(&config.exclude)?;
    let mut set = DocumentSet::default();
    let mut seen = HashSet::new();

    for root in &config.paths {
        if !root.is_dir() {
            if !matches_exclude(root, &exclude_patterns) && seen.insert(root.clone()) {
                set.files.push(root.clone());
            }
            continue;
        }

        let mut walked = Vec::new();
        for entry_result in WalkDir::new(root)
            .follow_links(config.follow_links)
            .max_depth(config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    set.failures.push((
                        path,
                        DocumentError::Read(format!("Directory traversal error: {walk_err}")),
                    ));
                    continue;
                }
            };

            let file_path = entry.path();
            if !entry.file_type().is_file()
                || !is_markdown(file_path)
                || matches_exclude(file_path, &exclude_patterns)
            {
                continue;
            }
            walked.push(file_path.to_path_buf());
        }

        walked.sort();
        debug!(root = %root.display(), found = walked.len(), "walked directory");
        for path in walked {
            if seen.insert(path.clone()) {
                set.files.push(path);
            }
        }
    }

    Ok(set)
}

/// Read a file using a bounded streaming read, enforcing `max_file_size`.
///
/// Reads at most `max_file_size + 1` bytes so oversized files are detected
/// without loading them whole.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be opened or read, is
/// larger than `max_file_size`, or is not valid UTF-8.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, DocumentError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DocumentError::Read(format!("Failed to open file: {e}")))?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| DocumentError::Read(format!("Failed to read file: {e}")))?;

    if buffer.len() as u64 > max_file_size {
        return Err(DocumentError::Read(format!(
            "File exceeds maximum size of {max_file_size} bytes"
        )));
    }

    String::from_utf8(buffer).map_err(|_| DocumentError::Read("File is not valid UTF-8".to_owned()))
}
