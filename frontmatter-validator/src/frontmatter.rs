//! Frontmatter extraction and YAML parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use serde_saphyr::Options;

use crate::error::DocumentError;

/// Opening `---` anchored at the very start of the document, a non-empty body,
/// and a closing `---` on its own line.
static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?s)\A---\n(.+?)\n---") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid frontmatter regex: {err}"),
    }
});

/// Parsed frontmatter: the top-level field mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Map<String, Value>,
}

impl Frontmatter {
    /// Look up a top-level field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// YAML 1.2 scalar rules: only `true`/`false` are booleans, so values such as
/// `No`, `on` or `y` stay strings.
#[must_use]
pub fn yaml_options() -> Options {
    Options {
        strict_booleans: true,
        ..Options::default()
    }
}

/// Return the text between the leading `---` delimiter lines, if any.
#[must_use]
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    FRONTMATTER_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse an extracted frontmatter block as a YAML mapping.
///
/// # Errors
///
/// Returns [`DocumentError::Parse`] with the parser's message if the block is
/// not well-formed YAML, or if its top level is not a mapping.
pub fn parse_frontmatter(block: &str) -> Result<Frontmatter, DocumentError> {
    let value: Value = serde_saphyr::from_str_with_options(block, yaml_options())
        .map_err(|e| DocumentError::Parse(e.to_string()))?;

    match value {
        Value::Object(fields) => Ok(Frontmatter { fields }),
        other => Err(DocumentError::Parse(format!(
            "Frontmatter must be a mapping of fields, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic_block() {
        let content = "---\ntitle: Demo\nlicense: MIT\n---\n\n# Body\n";
        assert_eq!(
            extract_frontmatter(content),
            Some("title: Demo\nlicense: MIT")
        );
    }

    #[test]
    fn test_extract_stops_at_first_closing_delimiter() {
        let content = "---\na: 1\n---\nbody\n---\nb: 2\n---\n";
        assert_eq!(extract_frontmatter(content), Some("a: 1"));
    }

    #[test]
    fn test_extract_requires_leading_delimiter() {
        assert_eq!(extract_frontmatter("# Title\n---\na: 1\n---\n"), None);
        assert_eq!(extract_frontmatter("\n---\na: 1\n---\n"), None);
    }

    #[test]
    fn test_extract_missing_closing_delimiter() {
        assert_eq!(extract_frontmatter("---\ntitle: Demo\n\n# Body\n"), None);
    }

    #[test]
    fn test_extract_no_block() {
        assert_eq!(extract_frontmatter("Just some prose.\n"), None);
        assert_eq!(extract_frontmatter(""), None);
    }

    #[test]
    fn test_parse_scalars_and_sequences() {
        let fm = parse_frontmatter("title: Demo\ntags:\n  - a\n  - b\nlicense: MIT").unwrap();
        assert_eq!(fm.field_count(), 3);
        assert_eq!(fm.get("license"), Some(&Value::String("MIT".to_owned())));
        assert!(fm.get("tags").is_some_and(Value::is_array));
        assert!(fm.get("missing").is_none());
    }

    #[test]
    fn test_parse_yaml_11_booleans_as_strings() {
        let fm = parse_frontmatter("hosted: No\nflag: on\nshort: y\nreal: true").unwrap();
        assert_eq!(fm.get("hosted"), Some(&Value::String("No".to_owned())));
        assert_eq!(fm.get("flag"), Some(&Value::String("on".to_owned())));
        assert_eq!(fm.get("short"), Some(&Value::String("y".to_owned())));
        assert_eq!(fm.get("real"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_parse_nested_mapping() {
        let fm = parse_frontmatter("meta:\n  author: someone\n  year: 2024").unwrap();
        assert!(fm.get("meta").is_some_and(Value::is_object));
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = parse_frontmatter("invalid: yaml: syntax:").unwrap_err();
        let DocumentError::Parse(msg) = err else {
            panic!("expected parse error, got {err:?}");
        };
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_parse_non_mapping_is_error() {
        let err = parse_frontmatter("- just\n- a list").unwrap_err();
        assert_eq!(
            err,
            DocumentError::Parse("Frontmatter must be a mapping of fields, found a sequence".to_owned())
        );
    }
}
