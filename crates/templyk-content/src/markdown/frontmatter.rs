//! YAML frontmatter extraction and template-schema validation.
//!
//! Frontmatter is metadata at the start of a markdown file, delimited by
//! `---`:
//!
//! ```markdown
//! ---
//! name: incident-runbook
//! description: Step-by-step incident response
//! tags:
//!   - ops
//!   - oncall
//! ---
//!
//! # Document Content
//! ```
//!
//! [`extract_frontmatter`] splits a document into its YAML mapping and
//! body. [`validate_frontmatter`] checks a mapping against the fixed
//! template schema (`name`, `description`, `tags`) and returns an
//! immutable [`TemplateFrontmatter`]. The schema is strict: missing
//! keys, wrongly-shaped values, and unknown extra keys all fail with a
//! schema error naming the offending key.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use templyk_core::{Error, Result};

/// Validated template metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateFrontmatter {
    /// Template name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// Result of splitting a document into frontmatter and body.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    mapping: Option<serde_yaml::Mapping>,
    body: &'a str,
}

impl<'a> FrontmatterSplit<'a> {
    /// Check if a frontmatter mapping was found.
    pub fn has_frontmatter(&self) -> bool {
        self.mapping.is_some()
    }

    /// The parsed frontmatter mapping, if present.
    pub fn mapping(&self) -> Option<&serde_yaml::Mapping> {
        self.mapping.as_ref()
    }

    /// Take ownership of the frontmatter mapping, if present.
    pub fn into_mapping(self) -> Option<serde_yaml::Mapping> {
        self.mapping
    }

    /// The body content after the frontmatter.
    pub fn body(&self) -> &'a str {
        self.body
    }
}

/// Extract YAML frontmatter from markdown content.
///
/// Content that does not open with a `---` line, or opens one without
/// ever closing it, is treated as all body. A present-but-unparseable
/// or non-mapping frontmatter block is a parse error; it is never
/// silently dropped.
pub fn extract_frontmatter(content: &str) -> Result<FrontmatterSplit<'_>> {
    if !content.starts_with("---") {
        return Ok(FrontmatterSplit {
            mapping: None,
            body: content,
        });
    }

    let after_open = match content[3..].find('\n') {
        Some(pos) => &content[3 + pos + 1..],
        None => {
            return Ok(FrontmatterSplit {
                mapping: None,
                body: content,
            });
        }
    };

    // Empty frontmatter (--- immediately) or normal case (\n---).
    let (yaml, after_close) = if let Some(rest) = after_open.strip_prefix("---") {
        ("", rest)
    } else if let Some(close) = after_open.find("\n---") {
        (&after_open[..close], &after_open[close + 4..])
    } else {
        log::warn!("frontmatter opening delimiter found but no closing delimiter");
        return Ok(FrontmatterSplit {
            mapping: None,
            body: content,
        });
    };

    let body = after_close.strip_prefix('\n').unwrap_or(after_close);

    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| Error::parse(format!("frontmatter is not valid YAML: {e}")))?;
    match value {
        Value::Null => Ok(FrontmatterSplit {
            mapping: Some(serde_yaml::Mapping::new()),
            body,
        }),
        Value::Mapping(mapping) => Ok(FrontmatterSplit {
            mapping: Some(mapping),
            body,
        }),
        other => Err(Error::parse(format!(
            "frontmatter must be a YAML mapping, got {}",
            value_kind(&other)
        ))),
    }
}

/// Validate a frontmatter mapping against the template schema.
///
/// Required keys: `name` (string), `description` (string), `tags`
/// (sequence of strings). Unknown keys are rejected.
pub fn validate_frontmatter(mapping: &serde_yaml::Mapping) -> Result<TemplateFrontmatter> {
    for key in mapping.keys() {
        let Some(key) = key.as_str() else {
            return Err(Error::schema(
                format!("{key:?}"),
                "frontmatter keys must be strings",
            ));
        };
        if !matches!(key, "name" | "description" | "tags") {
            return Err(Error::schema(key, "unknown frontmatter key"));
        }
    }

    Ok(TemplateFrontmatter {
        name: require_string(mapping, "name")?,
        description: require_string(mapping, "description")?,
        tags: require_string_sequence(mapping, "tags")?,
    })
}

fn lookup<'a>(mapping: &'a serde_yaml::Mapping, key: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

fn require_string(mapping: &serde_yaml::Mapping, key: &str) -> Result<String> {
    let value = lookup(mapping, key).ok_or_else(|| Error::schema(key, "missing required key"))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::schema(key, format!("expected a string, got {}", value_kind(value))))
}

fn require_string_sequence(mapping: &serde_yaml::Mapping, key: &str) -> Result<Vec<String>> {
    let value = lookup(mapping, key).ok_or_else(|| Error::schema(key, "missing required key"))?;
    let sequence = value.as_sequence().ok_or_else(|| {
        Error::schema(key, format!("expected a sequence, got {}", value_kind(value)))
    })?;
    sequence
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                Error::schema(
                    key,
                    format!("expected a sequence of strings, got {} entry", value_kind(item)),
                )
            })
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
