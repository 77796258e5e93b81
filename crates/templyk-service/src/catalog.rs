//! The template catalog: listing and fetching templates.
//!
//! Templates are markdown files under the configured prompt directory,
//! each opening with a frontmatter block that satisfies the template
//! schema. Listing enumerates `**/*.md` beneath that root; fetching
//! reads one file and validates its metadata into a [`Template`]
//! record.
//!
//! Two catalog operations are explicit feature gaps rather than silent
//! no-ops: listing in server mode and fetching a URL-sourced template
//! both fail with `Error::NotImplemented`.

use std::fs;
use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use templyk_content::markdown::{extract_frontmatter, validate_frontmatter};
use templyk_core::{Config, Error, Result};

/// One catalog entry: validated template metadata plus its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Template name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Path the template was loaded from.
    pub path: String,
}

/// List all template paths in the prompt directory.
///
/// Paths are returned lexicographically sorted so listings are
/// deterministic across filesystems.
pub fn list_templates(config: &Config) -> Result<Vec<String>> {
    if config.is_server() {
        return Err(Error::NotImplemented("server-mode template listing"));
    }

    let prompt_dir = config.prompt_dir.as_ref().ok_or_else(|| {
        Error::config("prompt_dir is not set; export TEMPLYK_PROMPT_DIR or use Config::local")
    })?;

    let pattern = format!("{}/**/*.md", prompt_dir.display());
    let entries = glob::glob(&pattern)
        .map_err(|e| Error::config(format!("invalid catalog pattern `{pattern}`: {e}")))?;

    let mut paths: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path.display().to_string()),
            Err(e) => {
                log::warn!("skipping unreadable catalog entry: {e}");
                None
            }
        })
        .collect();
    paths.sort();

    log::debug!("listed {} templates under {}", paths.len(), prompt_dir.display());
    Ok(paths)
}

/// Fetch a template record from a path or URL reference.
///
/// Reads the file, extracts its frontmatter, and validates it against
/// the template schema. A missing file is `Error::TemplateNotFound`; a
/// file without valid frontmatter is a schema error naming the
/// offending key.
pub fn get_template(path_or_ref: &str) -> Result<Template> {
    if path_or_ref.starts_with("http://") || path_or_ref.starts_with("https://") {
        return Err(Error::NotImplemented("URL-sourced templates"));
    }

    let content = fs::read_to_string(path_or_ref).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::not_found(path_or_ref)
        } else {
            Error::Io(e)
        }
    })?;

    let split = extract_frontmatter(&content)?;
    let mapping = split.into_mapping().unwrap_or_default();
    let meta = validate_frontmatter(&mapping)?;

    Ok(Template {
        name: meta.name,
        description: meta.description,
        tags: meta.tags,
        path: path_or_ref.to_string(),
    })
}
