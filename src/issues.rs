//! Finding and issue types produced by the checkers.
//!
//! - `Finding`: what a checker attaches to one catalog entry.
//! - `Issue`: a finding once it is surfaced by the reporter, located in a
//!   file at the start line of its entry.

use serde::Serialize;

// ============================================================
// Severity
// ============================================================

/// Severity level of a finding.
///
/// Only errors affect the exit status; warnings are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

// ============================================================
// Finding
// ============================================================

/// One issue attached to an entry by a checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub checker: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn warning(checker: &'static str, message: impl Into<String>) -> Self {
        Self {
            checker,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(checker: &'static str, message: impl Into<String>) -> Self {
        Self {
            checker,
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:^14}] {}", self.checker, self.message)
    }
}

// ============================================================
// Issue
// ============================================================

/// A surfaced finding, located at the first line of its entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub file_path: String,
    pub line: usize,
    pub checker: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    pub fn new(file_path: impl Into<String>, line: usize, finding: &Finding) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            checker: finding.checker,
            severity: finding.severity,
            message: finding.message.clone(),
        }
    }
}

/// Name used for issues that come from a catalog that failed to parse.
pub const PARSE_ERROR_CHECKER: &str = "Parse error";
