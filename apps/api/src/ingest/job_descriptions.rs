//! Loader for the role description file.
//!
//! Format: each role starts with a header line such as
//! `===== Data Scientist =====`; everything up to the next header is that
//! role's text. Text before the first header is ignored.

use std::path::Path;

use tracing::{info, warn};

use crate::analysis::normalizer::TextNormalizer;
use crate::ingest::IngestError;
use crate::models::role::{RoleCatalog, RoleDescription};

const HEADER_FENCE: &str = "=====";

/// Returns the role name if `line` is a section header.
fn parse_header(line: &str) -> Option<&str> {
    let inner = line
        .trim()
        .strip_prefix(HEADER_FENCE)?
        .strip_suffix(HEADER_FENCE)?;
    let name = inner.trim_matches('=').trim();
    (!name.is_empty()).then_some(name)
}

/// Splits `content` into `(role name, role text)` pairs in file order.
/// Role text is trimmed and may be empty.
pub fn split_sections(content: &str) -> Vec<(String, String)> {
    let mut sections: Vec<(String, String)> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in content.lines() {
        if let Some(name) = parse_header(line) {
            if let Some((name, lines)) = current.take() {
                sections.push((name, lines.join("\n").trim().to_string()));
            }
            current = Some((name.to_string(), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some((name, lines)) = current {
        sections.push((name, lines.join("\n").trim().to_string()));
    }

    sections
}

/// Builds a catalog from file content. Later duplicates replace earlier text.
pub fn parse_job_descriptions(
    content: &str,
    normalizer: &TextNormalizer,
) -> Result<RoleCatalog, IngestError> {
    let mut catalog = RoleCatalog::new();

    for (name, text) in split_sections(content) {
        let role = RoleDescription::new(name, text, normalizer);
        info!(
            role = %role.name,
            terms = role.cleaned_text.split_whitespace().count(),
            "Loaded job description"
        );
        if let Some(previous) = catalog.insert(role) {
            warn!(role = %previous.name, "Duplicate role header; later description wins");
        }
    }

    if catalog.is_empty() {
        return Err(IngestError::NoSections);
    }

    Ok(catalog)
}

pub fn load_job_descriptions(
    path: &Path,
    normalizer: &TextNormalizer,
) -> Result<RoleCatalog, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_job_descriptions(&content, normalizer)?;
    info!(
        path = %path.display(),
        roles = catalog.len(),
        "Found job descriptions"
    );
    Ok(catalog)
}
