//! Catalog rendering.
//!
//! ## Module Structure
//!
//! - `write`: idempotent write decision and file output

pub mod write;

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use crate::core::data::Message;
use crate::utils::{canon_path, relative_path};

pub use write::{CREATION_DATE_ANCHOR, REVISION_DATE_ANCHOR, WriteOutcome, should_write, write_if_changed};

/// File extension of rendered catalogs.
pub const CATALOG_EXTENSION: &str = "pot";

/// Everything a catalog template needs to render one domain.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub project: &'a str,
    pub version: &'a str,
    pub copyright: &'a str,
    pub last_translator: &'a str,
    pub language_team: &'a str,
    /// Creation timestamp shared by all catalogs of the build.
    pub ctime: &'a str,
    pub display_location: bool,
    pub display_uuid: bool,
    /// Messages in first-insertion order.
    pub messages: Vec<Message>,
}

/// Renders a [`RenderContext`] into catalog text.
pub trait CatalogTemplate: Sync {
    fn render(&self, context: &RenderContext<'_>) -> String;
}

/// Escape text for a double-quoted gettext string.
///
/// Newlines end the current string and continue on a new quoted line.
///
/// ```
/// use potgen::core::render::escape;
///
/// assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(escape("a\nb"), "a\\n\"\n\"b");
/// ```
pub fn escape(text: &str) -> String {
    text.replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', "\\n\"\n\"")
}

/// The built-in `.pot` template.
#[derive(Debug, Clone)]
pub struct PotTemplate {
    /// Directory the catalog is written to; locations are shown relative to it.
    outdir: PathBuf,
}

impl PotTemplate {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    fn relpath(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }
        canon_path(&relative_path(Path::new(source), &self.outdir))
    }
}

impl CatalogTemplate for PotTemplate {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_header(&mut out, ctx);
        for message in &ctx.messages {
            let _ = self.write_entry(&mut out, ctx, message);
        }
        out
    }
}

fn write_header(out: &mut String, ctx: &RenderContext<'_>) -> std::fmt::Result {
    writeln!(out, "# SOME DESCRIPTIVE TITLE.")?;
    writeln!(out, "# Copyright (C) {}", ctx.copyright)?;
    writeln!(
        out,
        "# This file is distributed under the same license as the {} package.",
        ctx.project
    )?;
    writeln!(out, "# FIRST AUTHOR <EMAIL@ADDRESS>, YEAR.")?;
    writeln!(out, "#")?;
    writeln!(out, "#, fuzzy")?;
    writeln!(out, "msgid \"\"")?;
    writeln!(out, "msgstr \"\"")?;
    writeln!(
        out,
        "\"Project-Id-Version: {} {}\\n\"",
        escape(ctx.project),
        escape(ctx.version)
    )?;
    writeln!(out, "\"Report-Msgid-Bugs-To: \\n\"")?;
    writeln!(out, "\"POT-Creation-Date: {}\\n\"", escape(ctx.ctime))?;
    writeln!(out, "\"PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\\n\"")?;
    writeln!(out, "\"Last-Translator: {}\\n\"", escape(ctx.last_translator))?;
    writeln!(out, "\"Language-Team: {}\\n\"", escape(ctx.language_team))?;
    writeln!(out, "\"MIME-Version: 1.0\\n\"")?;
    writeln!(out, "\"Content-Type: text/plain; charset=UTF-8\\n\"")?;
    writeln!(out, "\"Content-Transfer-Encoding: 8bit\\n\"")
}

impl PotTemplate {
    fn write_entry(
        &self,
        out: &mut String,
        ctx: &RenderContext<'_>,
        message: &Message,
    ) -> std::fmt::Result {
        writeln!(out)?;
        if ctx.display_location {
            for location in &message.locations {
                let path = self.relpath(&location.source);
                match location.line {
                    Some(line) => writeln!(out, "#: {}:{}", path, line)?,
                    None => writeln!(out, "#: {}", path)?,
                }
            }
        }
        if ctx.display_uuid {
            for uuid in &message.uuids {
                writeln!(out, "#: {}", uuid)?;
            }
        }
        writeln!(out, "msgid \"{}\"", escape(&message.text))?;
        writeln!(out, "msgstr \"\"")
    }
}
