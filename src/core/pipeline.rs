//! Checking pipeline: parse, run checkers, report.
//!
//! Files are independent: they are checked in parallel with rayon, and the
//! results are put back in input order so the output is deterministic.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    core::{
        catalog::Catalog,
        error::ParseError,
        parsers::po::parse_po_file,
        report::{Report, report},
        scope::PullRequestInfo,
    },
    issues::{Finding, Issue, PARSE_ERROR_CHECKER},
    rules::{CheckFailure, CheckerRegistry},
};

/// Outcome of checking one catalog.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub report: Report,
    /// Checkers that failed on this catalog.
    pub failures: Vec<CheckFailure>,
}

/// Outcome of checking many files.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    /// Findings of every file, parse errors included, in input order.
    pub report: Report,
    pub files_checked: usize,
    pub parse_errors: usize,
    pub checker_failures: usize,
}

/// Run every checker on an already parsed catalog and report it.
pub fn check_catalog(
    catalog: &mut Catalog,
    registry: &CheckerRegistry,
    pull_request: Option<&PullRequestInfo>,
) -> (Report, Vec<CheckFailure>) {
    let failures = registry.run(catalog);
    let report = report(catalog, pull_request);
    debug!(
        path = %catalog.path.display(),
        findings = catalog.finding_count(),
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "checked catalog"
    );
    (report, failures)
}

pub fn check_file(
    path: &Path,
    registry: &CheckerRegistry,
    pull_request: Option<&PullRequestInfo>,
) -> Result<FileOutcome, ParseError> {
    let mut catalog = parse_po_file(path)?;
    let (report, failures) = check_catalog(&mut catalog, registry, pull_request);
    Ok(FileOutcome {
        path: path.to_path_buf(),
        report,
        failures,
    })
}

/// Issue standing for a catalog that could not be parsed.
pub fn parse_error_issue(path: &Path, error: &ParseError) -> Issue {
    let line = match error {
        ParseError::Malformed { line, .. } => *line,
        _ => 0,
    };
    Issue::new(
        path.to_string_lossy(),
        line,
        &Finding::error(PARSE_ERROR_CHECKER, error.to_string()),
    )
}

/// Check every file, in parallel. A file that fails to parse is reported as
/// an error and does not stop the others.
pub fn check_paths(
    paths: &[PathBuf],
    registry: &CheckerRegistry,
    pull_request: Option<&PullRequestInfo>,
) -> CheckOutcome {
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| (path, check_file(path, registry, pull_request)))
        .collect();

    let mut outcome = CheckOutcome::default();
    for (path, result) in results {
        match result {
            Ok(file) => {
                outcome.files_checked += 1;
                outcome.checker_failures += file.failures.len();
                outcome.report.extend(file.report);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to parse catalog");
                outcome.parse_errors += 1;
                outcome.report.errors.push(parse_error_issue(path, &err));
            }
        }
    }
    outcome
}
