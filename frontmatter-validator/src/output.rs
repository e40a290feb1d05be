//! Output formatting for validation reports.
//!
//! The Markdown report is the CI artifact (posted as a PR comment). The JSON
//! and plain-text writers are terminal summaries for the CLI.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::config::ReportConfig;
use crate::report::ValidationReport;

const FRONTMATTER_HEADING: &str =
    "## :triangular_flag_on_post: Potential issue - invalid frontmatter";
const FRONTMATTER_INTRO: &str = "**One or more of your committed Markdown files might be missing frontmatter or have an invalid structure.**\n\n\
If your PR is to add or edit a project file, please double-check your frontmatter is wrapped in triple dashes (---).";

const TAGS_HEADING: &str = "## :triangular_flag_on_post: Potential issue - invalid tags";
const TAGS_INTRO: &str = "**One or more of your committed Markdown files might have invalid tag values.**";
const TAGS_OUTRO: &str = "If your PR is adding new tag categories or options, you can disregard this warning. \
The repo maintainer will be in touch if they have any questions or concerns about your additions.\n\n\
If you did **not** intend to add new tag categories or options, please carefully review your file(s) for the following common issues:\n\
- Capitalization or spelling errors\n\
- For empty tag categories, ensure that you either leave a space and empty square brackets following the colon, \
(e.g., `category name: []`), or comment out or delete the line in the frontmatter.\n\n\
**Add any corrections by pushing them to the branch from which you originated this pull request.**";

/// Write the Markdown report to a writer.
///
/// Sections appear in fixed order: invalid frontmatter, then invalid tags.
/// Nothing is written for an empty report.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_markdown(
    report: &ValidationReport,
    config: &ReportConfig,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    if !report.malformed.is_empty() {
        writeln!(writer, "{FRONTMATTER_HEADING}")?;
        writeln!(writer)?;
        writeln!(writer, "{FRONTMATTER_INTRO}")?;
        writeln!(writer)?;
        for (path, message) in &report.malformed {
            writeln!(writer, "- **{}**: {message}", path.display())?;
        }
    }

    if !report.tag_issues.is_empty() {
        if !report.malformed.is_empty() {
            writeln!(writer)?;
        }
        writeln!(writer, "{TAGS_HEADING}")?;
        writeln!(writer)?;
        if let Some(url) = &config.tag_list_url {
            writeln!(
                writer,
                "{TAGS_INTRO} The below files contain tags that do not match the options [here]({url})."
            )?;
        } else {
            writeln!(
                writer,
                "{TAGS_INTRO} The below files contain tags that do not match the accepted options."
            )?;
        }
        for (path, issues) in &report.tag_issues {
            writeln!(writer)?;
            writeln!(writer, "**{}:**", path.display())?;
            for issue in issues {
                writeln!(writer, "- {issue}")?;
            }
        }
        writeln!(writer)?;
        writeln!(writer, "{TAGS_OUTRO}")?;
    }

    Ok(())
}

/// Render the Markdown report to a string. Empty when there is nothing to report.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_markdown(report: &ValidationReport, config: &ReportConfig) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_markdown(report, config, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write the Markdown report to `path` if there is anything to report.
///
/// Returns `true` if a file was written.
///
/// # Errors
///
/// Returns an error if rendering or writing the file fails.
pub fn write_report_file(
    report: &ValidationReport,
    config: &ReportConfig,
    path: &Path,
) -> anyhow::Result<bool> {
    let content = render_markdown(report, config)?;
    if content.is_empty() {
        info!("No validation issues found.");
        return Ok(false);
    }

    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write report {}: {e}", path.display()))?;
    info!(path = %path.display(), "Validation report generated.");
    Ok(true)
}

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  FRONTMATTER TAG VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files checked:        {}", report.checked_files)?;
    writeln!(writer, "  Invalid frontmatter:  {}", report.malformed.len())?;
    writeln!(writer, "  Files with bad tags:  {}", report.tag_issues.len())?;
    writeln!(writer)?;

    if !report.malformed.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  INVALID FRONTMATTER")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for (path, message) in &report.malformed {
            writeln!(writer, "{}: {message}", path.display())?;
        }
        writeln!(writer)?;
    }

    if !report.tag_issues.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  INVALID TAGS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for (path, issues) in &report.tag_issues {
            for issue in issues {
                writeln!(writer, "{}: {}", path.display(), issue.replace("**", ""))?;
            }
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.is_empty() {
        writeln!(writer, "All {} files passed validation", report.checked_files)?;
    } else {
        writeln!(
            writer,
            "{} file(s) need attention ({} invalid tag line(s))",
            report.files_with_issues(),
            report.tag_issue_count()
        )?;
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
