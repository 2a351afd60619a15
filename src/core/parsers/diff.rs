//! Unified diff parsing.
//!
//! Only what scoping needs: hunk headers of one file's patch, and the split of
//! a multi-file patch into per-file patches.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

/// Context lines a code-hosting diff adds on each side of a hunk.
pub const CONTEXT_LINES: usize = 3;

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@\s*-(\d+)(?:,(\d+))?\s+\+(\d+)(?:,(\d+))?\s+@@").unwrap()
});

/// A hunk header `@@ -a,b +c,d @@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

impl Hunk {
    /// Parse a hunk header line. A missing length means one line.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HUNK_HEADER.captures(line)?;
        let number = |index: usize, default: usize| {
            caps.get(index)
                .map_or(Some(default), |m| m.as_str().parse().ok())
        };
        Some(Self {
            old_start: number(1, 0)?,
            old_len: number(2, 1)?,
            new_start: number(3, 0)?,
            new_len: number(4, 1)?,
        })
    }

    /// Lines of the new file changed by this hunk, context lines excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use polint::core::parsers::diff::Hunk;
    ///
    /// let hunk = Hunk::parse("@@ -10,5 +20,9 @@").unwrap();
    /// assert_eq!(hunk.changed_lines(), 23..26);
    /// ```
    pub fn changed_lines(&self) -> Range<usize> {
        let start = self.new_start + CONTEXT_LINES;
        let end = (self.new_start + self.new_len).saturating_sub(CONTEXT_LINES);
        start..end.max(start)
    }
}

/// Every hunk header of a single-file patch, in order.
pub fn parse_hunks(diff: &str) -> Vec<Hunk> {
    diff.lines()
        .filter(|line| line.starts_with("@@"))
        .filter_map(Hunk::parse)
        .collect()
}

/// The patch of one file inside a multi-file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    /// Path of the file in the new tree, without the `b/` prefix.
    pub filename: String,
    /// Hunks of the file, starting at its first `@@` header.
    pub diff: String,
}

/// Split a multi-file unified diff (`git diff` or `diff -u` output).
///
/// Deleted files are skipped since they have no lines to check.
pub fn split_patch(patch: &str) -> Vec<FilePatch> {
    let mut patches = Vec::new();
    let mut current: Option<FilePatch> = None;
    // Old and new lines still expected in the current hunk body.
    let mut remaining = (0usize, 0usize);

    for line in patch.lines() {
        if remaining != (0, 0) {
            match line.chars().next() {
                Some('+') => remaining.1 = remaining.1.saturating_sub(1),
                Some('-') => remaining.0 = remaining.0.saturating_sub(1),
                Some('\\') => {}
                _ => {
                    remaining.0 = remaining.0.saturating_sub(1);
                    remaining.1 = remaining.1.saturating_sub(1);
                }
            }
            push_line(&mut current, line);
            continue;
        }

        if let Some(hunk) = line.starts_with("@@").then(|| Hunk::parse(line)).flatten() {
            remaining = (hunk.old_len, hunk.new_len);
            push_line(&mut current, line);
        } else if let Some(target) = line.strip_prefix("+++ ") {
            if let Some(patch) = current.take() {
                patches.push(patch);
            }
            current = new_file_name(target).map(|filename| FilePatch {
                filename,
                diff: String::new(),
            });
        } else if line.starts_with("diff ") {
            if let Some(patch) = current.take() {
                patches.push(patch);
            }
        } else if line.starts_with("\\") {
            push_line(&mut current, line);
        }
    }

    if let Some(patch) = current.take() {
        patches.push(patch);
    }
    patches
}

fn push_line(current: &mut Option<FilePatch>, line: &str) {
    if let Some(patch) = current {
        patch.diff.push_str(line);
        patch.diff.push('\n');
    }
}

fn new_file_name(target: &str) -> Option<String> {
    // `diff -u` appends a tab and a timestamp.
    let target = target.split('\t').next().unwrap_or(target).trim();
    if target == "/dev/null" {
        return None;
    }
    let name = target.strip_prefix("b/").unwrap_or(target);
    Some(name.to_string())
}
