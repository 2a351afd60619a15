use serde::Serialize;
use tracing::info;

use crate::{
    core::{
        catalog::Catalog,
        scope::{PullRequestInfo, tag_scope},
    },
    issues::{Issue, Severity},
};

/// Findings of one catalog surfaced to the user, split by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn extend(&mut self, other: Report) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Collect the findings of in-scope entries, in entry order then finding order.
///
/// Scope is recomputed from `pull_request` on every call.
pub fn report(catalog: &mut Catalog, pull_request: Option<&PullRequestInfo>) -> Report {
    tag_scope(catalog, pull_request);

    let file_path = catalog.display_path();
    let mut report = Report::default();
    for entry in catalog.entries.iter().filter(|e| e.in_diff_scope) {
        for finding in entry.findings() {
            info!(
                file_path = %file_path,
                line_number = entry.line_start,
                checker = finding.checker,
                severity = %finding.severity,
                message = %finding.message,
                "finding"
            );
            let issue = Issue::new(file_path.as_str(), entry.line_start, finding);
            match finding.severity {
                Severity::Error => report.errors.push(issue),
                Severity::Warning => report.warnings.push(issue),
            }
        }
    }
    report
}
