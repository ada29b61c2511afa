//! Report formatting and printing utilities.
//!
//! Issues are printed cargo-style to stderr; command summaries go to stdout.
//! Kept apart from the core so the generator can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, GenerateSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues to stderr.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        print_issue(issue, writer);
    }

    print_summary(issues, writer);
}

pub fn print(result: &CommandResult, verbose: bool) {
    report(&result.issues);

    match &result.summary {
        CommandSummary::Generate(summary) => {
            if verbose && !summary.is_dry_run {
                print_written_to(summary, &mut io::stderr().lock());
            }
            print_generate_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.location());

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        if issues.len() == 1 {
            "problem"
        } else {
            "problems"
        },
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn print_written_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    for artifact in &summary.artifacts {
        let _ = writeln!(
            writer,
            "  {} {} -> {}",
            "wrote".green(),
            artifact.name,
            artifact.path.display()
        );
    }
}

fn print_generate_to<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    let count = summary.artifacts.len();

    if summary.is_dry_run {
        let _ = writeln!(
            writer,
            "{} {} binding(s) into {}:",
            "Would generate".yellow().bold(),
            count,
            summary.output_dir.display()
        );
        for artifact in &summary.artifacts {
            let _ = writeln!(writer, "  - {}", artifact.name);
        }
        let _ = writeln!(
            writer,
            "Run without {} to write these files.",
            "--dry-run".cyan()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Generated {} binding(s) from {} model {}",
            count,
            summary.model_files,
            if summary.model_files == 1 {
                "file"
            } else {
                "files"
            }
        )
        .green()
    );
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
