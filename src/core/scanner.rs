use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const CATALOG_EXTENSION: &str = "po";

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_catalog(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == CATALOG_EXTENSION)
}

/// Result of scanning paths for catalogs.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Catalogs found, sorted and without duplicates.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Find the catalogs to check.
///
/// Files given explicitly are kept whatever their extension; directories are
/// walked for `*.po` files. `ignores` apply to walked paths only.
pub fn scan_catalogs(paths: &[PathBuf], ignores: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<&Path> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(Path::new(p));
        }
    }

    for root in paths {
        if root.is_file() {
            files.insert(root.clone());
            continue;
        }
        if !root.exists() {
            warn!(path = %root.display(), "path does not exist");
            skipped_count += 1;
            continue;
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_catalog(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    debug!(found = files.len(), skipped = skipped_count, "scanned for catalogs");
    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}
