//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format, or as a JSON document.
//! Separate from core logic so polint can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;

use super::{
    args::OutputFormat,
    commands::{CheckSummary, CommandResult, CommandSummary, InitSummary},
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Issues are expected sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    for issue in issues {
        print_issue(issue, writer);
    }

    print_summary(issues, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(files: usize, scoped: bool) {
    print_success_to(files, scoped, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, scoped: bool, writer: &mut W) {
    let msg = format!(
        "Checked {} {}{} - no issues found",
        files,
        if files == 1 { "catalog" } else { "catalogs" },
        if scoped { " (changed entries only)" } else { "" }
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize) {
    print_parse_warning_to(count, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed",
            "warning:".bold().yellow(),
            count,
        );
    }
}

/// Print a warning about checkers that failed and were skipped.
///
/// Each failure has already been logged with its cause.
pub fn print_failure_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} checker run(s) failed and were skipped",
            "warning:".bold().yellow(),
            count,
        );
    }
}

/// JSON document printed with `--format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub files_checked: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub issues: &'a [Issue],
}

pub fn report_json_to<W: Write>(result: &CommandResult, files_checked: usize, writer: &mut W) {
    let document = JsonReport {
        files_checked,
        error_count: result.error_count,
        warning_count: result.warning_count,
        issues: &result.issues,
    };
    match serde_json::to_string_pretty(&document) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => tracing::error!(error = %err, "failed to serialize report"),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message,
        issue.checker.dimmed().cyan()
    );

    // Clickable location: --> path:line
    let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), issue.file_path, issue.line);

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
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
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Check(summary) => print_check(result, summary),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_check(result: &CommandResult, summary: &CheckSummary) {
    match summary.format {
        OutputFormat::Json => {
            report_json_to(result, summary.files_checked, &mut io::stdout().lock());
        }
        OutputFormat::Human => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(summary.files_checked, summary.scoped);
            }
        }
    }
    print_parse_warning(summary.parse_error_count);
    print_failure_warning_to(summary.checker_failure_count, &mut io::stderr().lock());
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    }
}

// ============================================================
// Tests
// ============================================================
