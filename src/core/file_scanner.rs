use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::core::doctree::DOCTREE_SUFFIX;
use crate::utils::canon_path;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// A document file found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// Path relative to the source directory without the doctree suffix,
    /// always with forward slashes.
    pub docname: String,
    pub path: PathBuf,
}

/// Result of scanning for documents.
pub struct ScanResult {
    /// Documents sorted by docname.
    pub documents: Vec<DocumentFile>,
    pub skipped_count: usize,
}

pub fn scan_documents(source_dir: &Path, ignore_patterns: &[String]) -> ScanResult {
    let mut documents = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => tracing::warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(source_dir.join(p));
        }
    }

    for entry in WalkDir::new(source_dir) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::debug!("Cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        let path_str = path.to_string_lossy();
        if glob_patterns.iter().any(|p| p.matches(&path_str)) {
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(docname) = docname_for(source_dir, path) else {
            continue;
        };
        documents.push(DocumentFile {
            docname,
            path: path.to_path_buf(),
        });
    }

    documents.sort_by(|a, b| a.docname.cmp(&b.docname));

    ScanResult {
        documents,
        skipped_count,
    }
}

fn docname_for(source_dir: &Path, path: &Path) -> Option<String> {
    let relative = canon_path(path.strip_prefix(source_dir).ok()?);
    let docname = relative.strip_suffix(DOCTREE_SUFFIX)?;
    (!docname.is_empty()).then(|| docname.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn docnames(result: &ScanResult) -> Vec<&str> {
        result.documents.iter().map(|d| d.docname.as_str()).collect()
    }

    #[test]
    fn test_scan_doctree_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("index.doctree.json")).unwrap();
        File::create(dir_path.join("index.rst")).unwrap();
        File::create(dir_path.join("notes.json")).unwrap();

        let result = scan_documents(dir_path, &[]);

        assert_eq!(docnames(&result), vec!["index"]);
        assert_eq!(result.documents[0].path, dir_path.join("index.doctree.json"));
    }

    #[test]
    fn test_scan_nested_directories_sorted() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let guide = dir_path.join("guide");
        fs::create_dir(&guide).unwrap();
        File::create(guide.join("start.doctree.json")).unwrap();
        File::create(guide.join("install.doctree.json")).unwrap();
        File::create(dir_path.join("index.doctree.json")).unwrap();

        let result = scan_documents(dir_path, &[]);

        assert_eq!(
            docnames(&result),
            vec!["guide/install", "guide/start", "index"]
        );
    }

    #[test]
    fn test_scan_ignores_glob_and_literal_patterns() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let drafts = dir_path.join("blog").join("drafts");
        fs::create_dir_all(&drafts).unwrap();
        File::create(drafts.join("post.doctree.json")).unwrap();

        let generated = dir_path.join("generated");
        fs::create_dir(&generated).unwrap();
        File::create(generated.join("api.doctree.json")).unwrap();

        File::create(dir_path.join("index.doctree.json")).unwrap();

        let result = scan_documents(
            dir_path,
            &["**/drafts/**".to_owned(), "generated".to_owned()],
        );

        assert_eq!(docnames(&result), vec!["index"]);
    }

    #[test]
    fn test_bare_suffix_is_not_a_document() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join(".doctree.json")).unwrap();

        let result = scan_documents(dir.path(), &[]);
        assert!(result.documents.is_empty());
    }

    #[test]
    fn test_missing_source_dir_is_skipped() {
        let dir = tempdir().unwrap();
        let result = scan_documents(&dir.path().join("missing"), &[]);
        assert!(result.documents.is_empty());
        assert_eq!(result.skipped_count, 1);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("**/drafts/**"));
        assert!(is_glob_pattern("draft?.doctree.json"));
        assert!(!is_glob_pattern("generated"));
    }
}
