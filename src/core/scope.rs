//! Restricting reports to the entries a patch touches.
//!
//! Checks always run on every entry; scoping only decides which entries the
//! reporter surfaces.

use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
};

use tracing::debug;

use crate::core::{
    catalog::Catalog,
    parsers::diff::{parse_hunks, split_patch},
};

/// Files of a reviewed patch, keyed by the path of their local copy.
#[derive(Debug, Clone, Default)]
pub struct PullRequestInfo {
    files: HashMap<PathBuf, PullRequestFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestFile {
    /// Where the new version of the file can be read locally.
    pub local_path: PathBuf,
    /// Unified diff of the file (hunks only).
    pub diff: String,
    /// Path of the file in the reviewed repository.
    pub filename: String,
}

impl PullRequestInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a multi-file unified diff, resolving file names against `root`.
    pub fn from_patch(patch: &str, root: &Path) -> Self {
        let mut info = Self::new();
        for file in split_patch(patch) {
            let local_path = root.join(&file.filename);
            info.add_file(file.filename, local_path, file.diff);
        }
        info
    }

    pub fn add_file(
        &mut self,
        filename: impl Into<String>,
        local_path: impl Into<PathBuf>,
        diff: impl Into<String>,
    ) {
        let local_path = local_path.into();
        self.files.insert(
            lookup_key(&local_path),
            PullRequestFile {
                local_path,
                diff: diff.into(),
                filename: filename.into(),
            },
        );
    }

    pub fn file(&self, path: &Path) -> Option<&PullRequestFile> {
        self.files.get(&lookup_key(path))
    }

    /// Diff of the file at `path`, empty when the patch does not touch it.
    pub fn diff(&self, path: &Path) -> &str {
        self.file(path).map_or("", |f| f.diff.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Local copies of every file in the patch.
    pub fn local_paths(&self) -> impl Iterator<Item = &Path> {
        self.files.values().map(|f| f.local_path.as_path())
    }
}

/// `./a/b.po` and `a/b.po` name the same file.
fn lookup_key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Mark which entries of the catalog are surfaced by the reporter.
///
/// Without patch information every entry is in scope. Otherwise an entry is in
/// scope when one of the lines changed by the catalog's diff falls within its
/// line range.
pub fn tag_scope(catalog: &mut Catalog, pull_request: Option<&PullRequestInfo>) {
    let Some(pull_request) = pull_request else {
        for entry in &mut catalog.entries {
            entry.in_diff_scope = true;
        }
        return;
    };

    let hunks = parse_hunks(pull_request.diff(&catalog.path));
    if hunks.is_empty() {
        debug!(path = %catalog.path.display(), "no hunk in patch, nothing in scope");
    }

    for entry in &mut catalog.entries {
        entry.in_diff_scope = hunks
            .iter()
            .any(|hunk| hunk.changed_lines().any(|line| entry.contains_line(line)));
    }
}
