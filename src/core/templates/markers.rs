//! Regex-based scanner for gettext markers in Jinja-style templates.
//!
//! Recognized markers:
//!
//! - `{{ _("text") }}`, `{{ gettext("text") }}` and the same calls inside
//!   `{% ... %}` statements
//! - `{{ ngettext("one file", "%(num)d files", n) }}` (both strings)
//! - `{% trans %}Hello {{ user }}{% endtrans %}`, optionally with
//!   `{% pluralize %}` and the `trimmed` modifier
//!
//! Calls whose arguments are not string literals are ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::{MarkerError, MarkerExtractor, TemplateMessage};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{-?(?P<expr>.*?)-?\}\}|\{%-?(?P<stmt>.*?)-?%\}|\{#.*?#\}")
        .expect("valid tag regex")
});

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w.])(?P<name>_|gettext|ngettext)\s*\(").expect("valid call regex")
});

static STRING_ARG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:"(?P<dq>(?:[^"\\]|\\.)*)"|'(?P<sq>(?:[^'\\]|\\.)*)')\s*(?P<sep>[,)])"#)
        .expect("valid string argument regex")
});

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

static WS_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("valid whitespace regex"));

/// Default [`MarkerExtractor`] for Jinja-style templates.
#[derive(Debug, Default, Clone, Copy)]
pub struct JinjaMarkerExtractor;

impl MarkerExtractor for JinjaMarkerExtractor {
    fn extract(&self, source: &str) -> Result<Vec<TemplateMessage>, MarkerError> {
        let line_index = build_line_index(source);
        let line_of = |offset: usize| offset_to_line(&line_index, offset);

        let mut messages = Vec::new();
        let mut block: Option<TransBlock> = None;
        let mut last_end = 0;
        let mut strip_next = false;

        for caps in TAG_RE.captures_iter(source) {
            let Some(tag) = caps.get(0) else { continue };
            let mut between = &source[last_end..tag.start()];
            check_unclosed(between, last_end, &line_of)?;
            let (strip_before, strip_after) = whitespace_control(tag.as_str());
            if strip_next {
                between = between.trim_start();
            }
            if strip_before {
                between = between.trim_end();
            }
            strip_next = strip_after;
            if let Some(block) = block.as_mut() {
                block.push_data(between);
            }
            last_end = tag.end();

            if let Some(expr) = caps.name("expr") {
                match block.as_mut() {
                    Some(block) => block.push_variable(expr.as_str(), line_of(tag.start()))?,
                    None => messages.extend(scan_calls(expr.as_str(), expr.start(), &line_of)),
                }
                continue;
            }
            let Some(stmt) = caps.name("stmt") else {
                // comment
                continue;
            };
            let line = line_of(tag.start());
            let words: Vec<&str> = stmt.as_str().split_whitespace().collect();
            match (block.take(), words.first().copied()) {
                (None, Some("trans")) => block = Some(TransBlock::open(&words[1..], line)),
                (Some(mut open), Some("pluralize")) => {
                    open.pluralize(line)?;
                    block = Some(open);
                }
                (Some(done), Some("endtrans")) => messages.extend(done.finish()),
                (Some(_), other) => {
                    return Err(MarkerError::UnexpectedTag {
                        line,
                        tag: other.unwrap_or_default().to_string(),
                    });
                }
                (None, Some(tag @ ("endtrans" | "pluralize"))) => {
                    return Err(MarkerError::UnexpectedTag {
                        line,
                        tag: tag.to_string(),
                    });
                }
                (None, _) => messages.extend(scan_calls(stmt.as_str(), stmt.start(), &line_of)),
            }
        }

        check_unclosed(&source[last_end..], last_end, &line_of)?;
        if let Some(open) = block {
            return Err(MarkerError::UnclosedTrans { line: open.line });
        }
        Ok(messages)
    }
}

fn check_unclosed(
    text: &str,
    base: usize,
    line_of: &impl Fn(usize) -> u32,
) -> Result<(), MarkerError> {
    match ["{{", "{%"].iter().filter_map(|open| text.find(open)).min() {
        Some(pos) => Err(MarkerError::UnclosedTag {
            line: line_of(base + pos),
        }),
        None => Ok(()),
    }
}

/// Whether a tag strips the whitespace before it (`{%-`) and after it (`-%}`).
fn whitespace_control(tag: &str) -> (bool, bool) {
    let inner = &tag[2..tag.len() - 2];
    (inner.starts_with('-'), inner.len() > 1 && inner.ends_with('-'))
}

/// Find gettext calls with literal arguments inside one tag.
fn scan_calls(code: &str, base: usize, line_of: &impl Fn(usize) -> u32) -> Vec<TemplateMessage> {
    let mut found = Vec::new();
    for caps in CALL_RE.captures_iter(code) {
        let (Some(name), Some(call)) = (caps.name("name"), caps.get(0)) else {
            continue;
        };
        let wanted = if name.as_str() == "ngettext" { 2 } else { 1 };
        let args = string_args(&code[call.end()..], wanted);
        if args.len() < wanted {
            continue;
        }
        let line = line_of(base + name.start());
        for message in args {
            found.push(TemplateMessage {
                line,
                method: name.as_str().to_string(),
                message,
            });
        }
    }
    found
}

/// Read up to `wanted` leading string literal arguments.
fn string_args(mut rest: &str, wanted: usize) -> Vec<String> {
    let mut args = Vec::new();
    while args.len() < wanted {
        let Some(caps) = STRING_ARG_RE.captures(rest) else {
            break;
        };
        let raw = caps
            .name("dq")
            .or_else(|| caps.name("sq"))
            .map_or("", |m| m.as_str());
        args.push(unescape(raw));
        let closed = caps.name("sep").is_some_and(|sep| sep.as_str() == ")");
        rest = &rest[caps.get(0).map_or(rest.len(), |m| m.end())..];
        if closed {
            break;
        }
    }
    args
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

struct TransBlock {
    line: u32,
    trimmed: bool,
    singular: String,
    plural: Option<String>,
    has_variables: bool,
}

impl TransBlock {
    fn open(params: &[&str], line: u32) -> Self {
        Self {
            line,
            trimmed: params.contains(&"trimmed"),
            singular: String::new(),
            plural: None,
            has_variables: false,
        }
    }

    fn buffer(&mut self) -> &mut String {
        self.plural.as_mut().unwrap_or(&mut self.singular)
    }

    fn push_data(&mut self, data: &str) {
        let escaped = data.replace('%', "%%");
        self.buffer().push_str(&escaped);
    }

    fn push_variable(&mut self, expr: &str, line: u32) -> Result<(), MarkerError> {
        let name = expr.trim();
        if !IDENT_RE.is_match(name) {
            return Err(MarkerError::InvalidTransVariable {
                line,
                expr: name.to_string(),
            });
        }
        self.has_variables = true;
        let placeholder = format!("%({})s", name);
        self.buffer().push_str(&placeholder);
        Ok(())
    }

    fn pluralize(&mut self, line: u32) -> Result<(), MarkerError> {
        if self.plural.is_some() {
            return Err(MarkerError::UnexpectedTag {
                line,
                tag: "pluralize".to_string(),
            });
        }
        self.plural = Some(String::new());
        Ok(())
    }

    fn finish(self) -> Vec<TemplateMessage> {
        let clean = |text: String| {
            let text = if self.trimmed {
                WS_NEWLINE_RE.replace_all(&text, " ").trim().to_string()
            } else {
                text
            };
            if self.has_variables {
                text
            } else {
                text.replace("%%", "%")
            }
        };
        let method = if self.plural.is_some() { "ngettext" } else { "gettext" };
        let line = self.line;
        std::iter::once(self.singular.clone())
            .chain(self.plural.clone())
            .map(clean)
            .map(|message| TemplateMessage {
                line,
                method: method.to_string(),
                message,
            })
            .collect()
    }
}

/// Byte offsets at which each line starts.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number of a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> u32 {
    let line = match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    };
    u32::try_from(line).unwrap_or(u32::MAX)
}
