//! Reference tag table and tag value normalization.

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::Value;

use crate::error::TagTableError;
use crate::frontmatter::{Frontmatter, yaml_options};

/// A frontmatter tag value, normalized once before comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl TagValue {
    /// Normalize a parsed YAML value.
    ///
    /// Non-string scalars are rendered as text, `null` as the empty string and
    /// nested mappings as compact JSON. Sequence elements are rendered the same way.
    #[must_use]
    pub fn from_yaml(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.iter().map(render_scalar).collect()),
            other => Self::Scalar(render_scalar(other)),
        }
    }

    /// The values in document order; a scalar is a one-element slice.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Scalar(v) => std::slice::from_ref(v),
            Self::Sequence(vs) => vs,
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Mapping from tag category to its accepted values.
///
/// Shaped as `{ "category": ["value", ...], ... }`. Immutable once loaded.
/// Categories keep the order they are declared in, which is the order issue
/// lines are reported in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TagTable {
    categories: IndexMap<String, IndexSet<String>>,
}

impl TagTable {
    /// Parse a JSON tag table.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object of string arrays.
    pub fn from_json_str(text: &str) -> Result<Self, TagTableError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a YAML tag table.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a YAML mapping of string sequences.
    pub fn from_yaml_str(text: &str) -> Result<Self, TagTableError> {
        serde_saphyr::from_str_with_options(text, yaml_options())
            .map_err(|e| TagTableError::Yaml(e.to_string()))
    }

    /// Load a tag table from disk. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, TagTableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TagTableError::Io {
            path: path.to_owned(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Values of `value` not accepted for `category`, in document order.
    ///
    /// Unknown categories accept everything.
    #[must_use]
    pub fn invalid_values<'a>(&self, category: &str, value: &'a TagValue) -> Vec<&'a str> {
        let Some(accepted) = self.categories.get(category) else {
            return Vec::new();
        };
        value
            .values()
            .iter()
            .filter(|v| !accepted.contains(v.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Check every table category present in `frontmatter`.
    ///
    /// Returns one formatted issue line per category with invalid values.
    #[must_use]
    pub fn check(&self, frontmatter: &Frontmatter) -> Vec<String> {
        let mut issues = Vec::new();
        for category in self.categories.keys() {
            let Some(raw) = frontmatter.get(category) else {
                continue;
            };
            let value = TagValue::from_yaml(raw);
            let invalid = self.invalid_values(category, &value);
            if !invalid.is_empty() {
                issues.push(format_issue(category, &invalid));
            }
        }
        issues
    }
}

/// Format an issue line as `**category**: v1, v2`.
#[must_use]
pub fn format_issue(category: &str, invalid: &[&str]) -> String {
    format!("**{category}**: {}", invalid.join(", "))
}
