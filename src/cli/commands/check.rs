use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::super::args::CheckCommand;
use super::{CheckSummary, CommandKind, CommandResult, CommandSummary, helper::finish};
use crate::{
    config::{ConfigLoadResult, load_config},
    core::{
        pipeline::check_paths,
        scanner::{CATALOG_EXTENSION, scan_catalogs},
        scope::PullRequestInfo,
    },
    rules::CheckerRegistry,
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let ConfigLoadResult { config, from_file } = load_config(&cwd)?;
    debug!(from_file, "configuration loaded");

    let pull_request = cmd
        .diff
        .as_deref()
        .map(|diff| load_pull_request(diff, cmd.diff_root.as_deref()))
        .transpose()?;

    let paths = if !cmd.paths.is_empty() {
        cmd.paths.clone()
    } else if let Some(pr) = &pull_request {
        pr.local_paths()
            .filter(|p| p.extension().is_some_and(|ext| ext == CATALOG_EXTENSION))
            .map(Path::to_path_buf)
            .collect()
    } else {
        vec![PathBuf::from(".")]
    };

    let scan = scan_catalogs(&paths, &config.ignores);
    let registry = CheckerRegistry::from_config(&config, !cmd.no_grammar)
        .context("Failed to load personal dictionaries")?;
    debug!(checkers = ?registry.names(), files = scan.files.len(), "starting check");

    let outcome = check_paths(&scan.files, &registry, pull_request.as_ref());

    let summary = CheckSummary {
        format: cmd.format,
        files_checked: outcome.files_checked,
        parse_error_count: outcome.parse_errors,
        checker_failure_count: outcome.checker_failures,
        scoped: pull_request.is_some(),
    };
    Ok(finish(
        CommandKind::Check,
        CommandSummary::Check(summary),
        outcome.report,
    ))
}

fn load_pull_request(diff: &Path, root: Option<&Path>) -> Result<PullRequestInfo> {
    let patch = fs::read_to_string(diff)
        .with_context(|| format!("Failed to read diff file: {:?}", diff))?;
    let pull_request = PullRequestInfo::from_patch(&patch, root.unwrap_or(Path::new(".")));
    if pull_request.is_empty() {
        warn!(path = %diff.display(), "patch does not touch any file");
    } else {
        debug!(files = pull_request.len(), "loaded patch");
    }
    Ok(pull_request)
}
