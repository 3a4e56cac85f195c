//! Template corpus discovery and marker extraction.
//!
//! ## Module Structure
//!
//! - `markers`: default regex-based Jinja marker scanner

pub mod markers;

use std::{collections::BTreeSet, path::Path};

use thiserror::Error;
use walkdir::WalkDir;

pub use markers::JinjaMarkerExtractor;

/// One translatable string found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMessage {
    /// 1-based line of the marker.
    pub line: u32,
    /// Marker function name (`_`, `gettext`, `ngettext`).
    pub method: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("line {line}: unclosed template tag")]
    UnclosedTag { line: u32 },
    #[error("line {line}: unclosed trans block")]
    UnclosedTrans { line: u32 },
    #[error("line {line}: unexpected tag '{tag}'")]
    UnexpectedTag { line: u32, tag: String },
    #[error("line {line}: trans blocks only accept simple variable names, found '{expr}'")]
    InvalidTransVariable { line: u32, expr: String },
}

/// Extracts translatable strings from raw template text.
pub trait MarkerExtractor: Sync {
    fn extract(&self, source: &str) -> Result<Vec<TemplateMessage>, MarkerError>;
}

/// Find every file with `extension` below the template directories.
///
/// Paths use forward slashes and are returned sorted, so extraction order does
/// not depend on the file system. Missing directories are skipped.
pub fn collect_templates(root: &Path, templates_path: &[String], extension: &str) -> Vec<String> {
    let mut files = BTreeSet::new();
    for dir in templates_path {
        let dir = root.join(dir);
        for entry in WalkDir::new(&dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("Skipping template path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().is_some_and(|ext| ext == extension)
            {
                files.insert(path.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    files.into_iter().collect()
}
