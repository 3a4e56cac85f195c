//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow potgen to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::builder::{BuildSummary, DomainReport};
use crate::core::render::WriteOutcome;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Mark for catalogs left untouched.
const UNCHANGED_MARK: &str = "=";

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Build(summary) => {
            report_build_to(summary, verbose, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
        }
    }
}

/// Print per-domain status lines and a summary line.
///
/// Unchanged catalogs are listed only in verbose mode.
pub fn report_build_to<W: Write>(summary: &BuildSummary, verbose: bool, writer: &mut W) {
    let shown: Vec<&DomainReport> = summary
        .domains
        .iter()
        .filter(|d| verbose || d.outcome == WriteOutcome::Written)
        .collect();

    let name_width = shown
        .iter()
        .map(|d| catalog_name(d).width())
        .max()
        .unwrap_or(0);

    for domain in shown {
        let name = catalog_name(domain);
        let padding = name_width - name.width();
        let count = format!(
            "{} {}",
            domain.message_count,
            plural(domain.message_count, "message", "messages")
        );
        let line = match domain.outcome {
            WriteOutcome::Written => format!("{} {}{:padding$}  {}", SUCCESS_MARK.green(), name, "", count),
            WriteOutcome::Unchanged => format!(
                "{} {}{:padding$}  {}",
                UNCHANGED_MARK.dimmed(),
                name,
                "",
                format!("{} (unchanged)", count).dimmed()
            ),
        };
        let _ = writeln!(writer, "{}", line);
    }

    let _ = writeln!(writer, "{}", summary_line(summary));
}

fn summary_line(summary: &BuildSummary) -> String {
    let catalogs = summary.domains.len();
    let written = summary.written_count();
    let unchanged = summary.unchanged_count();
    let message = format!(
        "Built {} {} from {} {} and {} {} ({} written, {} unchanged)",
        catalogs,
        plural(catalogs, "catalog", "catalogs"),
        summary.document_count,
        plural(summary.document_count, "document", "documents"),
        summary.template_count,
        plural(summary.template_count, "template", "templates"),
        written,
        unchanged
    );
    format!("{} {}", SUCCESS_MARK.green(), message.green())
}

fn catalog_name(domain: &DomainReport) -> String {
    domain
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| domain.domain.clone())
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("{} {}", FAILURE_MARK.red(), error);
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn domain(name: &str, count: usize, outcome: WriteOutcome) -> DomainReport {
        DomainReport {
            domain: name.to_string(),
            path: PathBuf::from(format!("/out/{}.pot", name)),
            message_count: count,
            outcome,
        }
    }

    fn summary() -> BuildSummary {
        BuildSummary {
            domains: vec![
                domain("guide", 1, WriteOutcome::Written),
                domain("index", 12, WriteOutcome::Unchanged),
                domain("templates", 3, WriteOutcome::Written),
            ],
            template_count: 1,
            document_count: 4,
        }
    }

    fn render(summary: &BuildSummary, verbose: bool) -> String {
        let mut buffer = Vec::new();
        report_build_to(summary, verbose, &mut buffer);
        strip_ansi(&String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_report_build() {
        assert_eq!(
            render(&summary(), false),
            "\u{2713} guide.pot      1 message\n\
             \u{2713} templates.pot  3 messages\n\
             \u{2713} Built 3 catalogs from 4 documents and 1 template (2 written, 1 unchanged)\n"
        );
    }

    #[test]
    fn test_report_build_verbose_lists_unchanged() {
        let output = render(&summary(), true);
        assert!(output.contains("= index.pot      12 messages (unchanged)\n"));
    }

    #[test]
    fn test_report_empty_build() {
        assert_eq!(
            render(&BuildSummary::default(), false),
            "\u{2713} Built 0 catalogs from 0 documents and 0 templates (0 written, 0 unchanged)\n"
        );
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file", "files"), "file");
        assert_eq!(plural(0, "file", "files"), "files");
        assert_eq!(plural(2, "file", "files"), "files");
    }
}
