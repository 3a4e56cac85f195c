use std::{fs, io, path::Path};

/// Header field holding the creation time; changes on every build.
pub const CREATION_DATE_ANCHOR: &str = "\"POT-Creation-Date:";
/// Header field following the creation time; the rest of the file is stable.
pub const REVISION_DATE_ANCHOR: &str = "\"PO-Revision-Date:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Decide whether `new_content` has to be written to `path`.
///
/// Returns `true` when the file is missing, is not valid UTF-8, lacks one of the
/// header anchors, or differs from `new_content` anywhere except the
/// creation-date line. Other read errors are propagated.
pub fn should_write(path: &Path, new_content: &str) -> io::Result<bool> {
    let old_content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => return Ok(true),
        Err(e) => return Err(e),
    };
    Ok(content_changed(&old_content, new_content))
}

fn content_changed(old: &str, new: &str) -> bool {
    let (Some(old_header), Some(new_header), Some(old_body), Some(new_body)) = (
        old.find(CREATION_DATE_ANCHOR),
        new.find(CREATION_DATE_ANCHOR),
        old.find(REVISION_DATE_ANCHOR),
        new.find(REVISION_DATE_ANCHOR),
    ) else {
        return true;
    };
    old[..old_header] != new[..new_header] || old[old_body..] != new[new_body..]
}

/// Write `content` to `path` unless only the volatile header changed.
pub fn write_if_changed(path: &Path, content: &str) -> io::Result<WriteOutcome> {
    if !should_write(path, content)? {
        return Ok(WriteOutcome::Unchanged);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(WriteOutcome::Written)
}
