use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

use frontmatter_validator::output::{write_human, write_json, write_report_file};
use frontmatter_validator::{
    CHANGED_FILES_ENV, DEFAULT_REPORT_FILE, DEFAULT_TAG_LIST_URL, DEFAULT_TAGS_FILE, ReportConfig,
    SourceConfig, TagTable, split_changed_files, validate_fs,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Validate Markdown frontmatter tags against an allow-list.
#[derive(Debug, Parser)]
#[command(name = "frontmatter-validator", version, about)]
pub struct Cli {
    /// Extra files or directories to validate
    pub paths: Vec<PathBuf>,

    /// Whitespace-separated list of changed files
    #[arg(long, env = CHANGED_FILES_ENV, default_value = "")]
    pub changed_files: String,

    /// Reference tag table (JSON, or YAML by extension)
    #[arg(long, env = "VALID_TAGS_FILE", default_value = DEFAULT_TAGS_FILE)]
    pub tags: PathBuf,

    /// Where to write the Markdown report
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Link to the tag list, shown in the invalid-tags section (empty to omit)
    #[arg(long, env = "VALID_TAGS_URL", default_value = DEFAULT_TAG_LIST_URL)]
    pub tag_list_url: String,

    /// Exclude glob (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Terminal summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Maximum size of a single document in bytes
    #[arg(long, default_value_t = 10_485_760)]
    pub max_file_size: u64,

    /// Exit with status 2 when anything is reported
    #[arg(long)]
    pub fail_on_issues: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        let mut paths = split_changed_files(&self.changed_files);
        for path in &self.paths {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }

        let mut config = SourceConfig::default();
        config.paths = paths;
        config.exclude.clone_from(&self.exclude);
        config.max_file_size = self.max_file_size;
        config
    }

    fn report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::default();
        if !self.tag_list_url.is_empty() {
            config.tag_list_url = Some(self.tag_list_url.clone());
        }
        config
    }
}

/// Run the validator. Returns `true` if the run should fail the CI job.
///
/// # Errors
///
/// Returns an error if the tag table cannot be loaded, an exclude pattern is
/// invalid, or the report cannot be written.
pub fn run(cli: &Cli) -> Result<bool> {
    let table = TagTable::load(&cli.tags)
        .with_context(|| format!("loading tag table {}", cli.tags.display()))?;
    if table.is_empty() {
        warn!(path = %cli.tags.display(), "tag table has no categories, tag values are not checked");
    } else {
        debug!(categories = table.len(), "loaded tag table");
    }

    let source = cli.source_config();
    info!(files = source.paths.len(), "changed files");

    let report = validate_fs(&source, &table)?;
    let written = write_report_file(&report, &cli.report_config(), &cli.output)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Human => write_human(&report, &mut out)?,
        OutputFormat::Json => write_json(&report, &mut out)?,
    }
    out.flush()?;

    Ok(written && cli.fail_on_issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_source_config_merges_changed_and_positional() {
        let cli = Cli::parse_from([
            "frontmatter-validator",
            "--changed-files",
            "a.md b.md",
            "b.md",
            "docs",
            "--exclude",
            "README.md",
        ]);
        let source = cli.source_config();
        assert_eq!(
            source.paths,
            vec![
                PathBuf::from("a.md"),
                PathBuf::from("b.md"),
                PathBuf::from("docs")
            ]
        );
        assert_eq!(source.exclude, vec!["README.md".to_owned()]);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["frontmatter-validator", "--changed-files", ""]);
        assert_eq!(cli.tags, PathBuf::from(DEFAULT_TAGS_FILE));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_REPORT_FILE));
        assert_eq!(cli.format, OutputFormat::Human);
        assert!(!cli.fail_on_issues);
        assert!(cli.source_config().paths.is_empty());
        assert_eq!(
            cli.report_config().tag_list_url.as_deref(),
            Some(DEFAULT_TAG_LIST_URL)
        );
    }

    #[test]
    fn test_empty_tag_list_url_omits_link() {
        let cli = Cli::parse_from([
            "frontmatter-validator",
            "--changed-files",
            "",
            "--tag-list-url",
            "",
        ]);
        assert!(cli.report_config().tag_list_url.is_none());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::parse_from(["frontmatter-validator", "-vv", "--changed-files", ""]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_run_with_tag_issues() {
        let tmp = tempfile::TempDir::new().unwrap();
        let tags = tmp.path().join("tags.json");
        std::fs::write(&tags, r#"{"license": ["MIT"]}"#).unwrap();
        let doc = tmp.path().join("demo.md");
        std::fs::write(&doc, "---\nlicense: GPL-3.0\n---\n").unwrap();
        let output = tmp.path().join("report.md");

        let args: Vec<OsString> = vec![
            "frontmatter-validator".into(),
            "--changed-files".into(),
            "".into(),
            "--tags".into(),
            tags.into_os_string(),
            "--output".into(),
            output.clone().into_os_string(),
            "--fail-on-issues".into(),
            doc.into_os_string(),
        ];
        let cli = Cli::parse_from(args);
        assert!(run(&cli).unwrap());
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("- **license**: GPL-3.0"));
        assert!(text.contains(&format!("[here]({DEFAULT_TAG_LIST_URL})")));
    }
}
