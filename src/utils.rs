//! Common utility functions shared across the codebase.

use std::path::{Component, Path, PathBuf};

/// Render a path with forward slashes regardless of platform.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use potgen::utils::canon_path;
///
/// assert_eq!(canon_path(Path::new("guide/install.rst")), "guide/install.rst");
/// ```
pub fn canon_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Lexically clean a path: drop `.` components and fold each `..` into the
/// component before it. Leading `..` of a relative path are kept, and `..`
/// directly below the root is dropped.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use potgen::utils::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("/p/./docs/../out")), Path::new("/p/out"));
/// assert_eq!(normalize_path(Path::new("../a/b/..")), Path::new("../a"));
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    let normalized: PathBuf = parts.iter().collect();
    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Lexically compute `path` relative to `base`.
///
/// Neither path is touched on disk. When the two share no root (different
/// drives, or one relative and one absolute), `path` is returned unchanged.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use potgen::utils::relative_path;
///
/// let rel = relative_path(Path::new("/p/index.rst"), Path::new("/p/_build/gettext"));
/// assert_eq!(rel, Path::new("../../index.rst"));
/// ```
pub fn relative_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() != base.is_absolute() {
        return path.to_path_buf();
    }

    let path = normalize_path(path);
    let base = normalize_path(base);
    let path_parts: Vec<Component> = path
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let base_parts: Vec<Component> = base
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    // Different prefixes (e.g. Windows drives) have nothing in common.
    if matches!(path_parts.first(), Some(Component::Prefix(_))) && common == 0 {
        return path;
    }

    let mut relative = PathBuf::new();
    for _ in &base_parts[common..] {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}
