use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {entry_type} index entry {value:?}")]
pub struct IndexEntryError {
    pub entry_type: String,
    pub value: String,
}

/// Split a composite index entry into its translatable parts.
///
/// | type              | parts | example                      |
/// |-------------------|-------|------------------------------|
/// | `single`          | 1–2   | `"loop; for"` or `"loop"`    |
/// | `pair`            | 2     | `"loop; statement"`          |
/// | `triple`          | 3     | `"module; search; path"`     |
/// | `see` / `seealso` | 2     | `"loop; iteration"`          |
///
/// # Examples
///
/// ```
/// use potgen::core::doctree::split_index_msg;
///
/// assert_eq!(split_index_msg("pair", "loop; statement").unwrap(), vec!["loop", "statement"]);
/// assert_eq!(split_index_msg("single", "loop").unwrap(), vec!["loop"]);
/// assert!(split_index_msg("quadruple", "a; b; c; d").is_err());
/// ```
pub fn split_index_msg(entry_type: &str, value: &str) -> Result<Vec<String>, IndexEntryError> {
    match entry_type {
        "single" => split_into(2, "single", value).or_else(|_| split_into(1, "single", value)),
        "pair" => split_into(2, "pair", value),
        "triple" => split_into(3, "triple", value),
        "see" | "seealso" => split_into(2, "see", value),
        _ => Err(IndexEntryError {
            entry_type: entry_type.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Split at the first `n - 1` semicolons; every one of the `n` parts must be
/// non-empty.
fn split_into(n: usize, entry_type: &str, value: &str) -> Result<Vec<String>, IndexEntryError> {
    let parts: Vec<String> = value
        .splitn(n, ';')
        .map(|part| part.trim().to_string())
        .collect();
    if parts.iter().filter(|part| !part.is_empty()).count() < n {
        return Err(IndexEntryError {
            entry_type: entry_type.to_string(),
            value: value.to_string(),
        });
    }
    Ok(parts)
}
