use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    core::report::Report,
    issues::{Issue, Severity},
};

/// Build the command result from a report.
///
/// Issues are sorted by file then line; the sort is stable so the findings
/// of one entry keep their order within a severity.
pub fn finish(kind: CommandKind, summary: CommandSummary, report: Report) -> CommandResult {
    let mut issues: Vec<Issue> = report.errors;
    issues.extend(report.warnings);
    issues.sort_by(|a, b| {
        a.file_path
            .cmp(&b.file_path)
            .then_with(|| a.line.cmp(&b.line))
    });

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    if let CommandSummary::Init(ref summary) = summary
        && summary.error.is_some()
    {
        error_count += 1;
    }

    CommandResult {
        kind,
        summary,
        error_count,
        warning_count,
        issues,
    }
}
