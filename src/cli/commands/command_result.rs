use crate::{cli::args::OutputFormat, issues::Issue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Check,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub format: OutputFormat,
    /// Number of catalogs parsed and checked.
    pub files_checked: usize,
    /// Number of catalogs that failed to parse.
    pub parse_error_count: usize,
    /// Number of (checker, catalog) pairs that failed.
    pub checker_failure_count: usize,
    /// Whether the report was restricted to the entries of a patch.
    pub scoped: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    /// Why the file was not created.
    pub error: Option<String>,
}

/// Result of running polint commands
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All surfaced issues, errors and warnings mixed, sorted by location.
    /// Empty for non-check commands.
    pub issues: Vec<Issue>,
}
