//! In-memory model of a parsed message catalog.
//!
//! A `Catalog` owns its entries in file order. After parsing, the entry list
//! is fixed; only findings and the diff-scope flag of each entry change.

use std::{path::PathBuf, sync::LazyLock};

use regex::Regex;

use crate::{core::markup::normalize, issues::Finding};

/// Translator comment marker exempting a term from the space-before-punctuation rule.
///
/// Example: `# nbsp-ignore:`re.sub()``
static NBSP_IGNORE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nbsp-ignore:`([^`]+)`").unwrap());

/// One translation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Text after `#: ` on the first line of the block.
    pub reference: String,
    /// First line of the block (1-based).
    pub line_start: usize,
    /// Last line of the block, inclusive.
    pub line_end: usize,
    /// Raw msgid segments, one per physical line.
    pub msgid: Vec<String>,
    /// Raw msgstr segments, one per physical line.
    pub msgstr: Vec<String>,
    pub fuzzy: bool,
    /// `# ` comment lines, without the leading `# `.
    pub translator_comments: Vec<String>,
    /// Whether the entry is surfaced by the reporter. Recomputed on every report.
    pub in_diff_scope: bool,
    findings: Vec<Finding>,
}

impl Entry {
    pub fn new(reference: impl Into<String>, line_start: usize) -> Self {
        Self {
            reference: reference.into(),
            line_start,
            line_end: line_start,
            ..Default::default()
        }
    }

    /// Full source text: msgid segments concatenated without separator.
    pub fn source_text(&self) -> String {
        self.msgid.concat()
    }

    /// Full translated text: msgstr segments concatenated without separator.
    pub fn translated_text(&self) -> String {
        self.msgstr.concat()
    }

    pub fn normalized_source(&self) -> String {
        normalize(&self.source_text())
    }

    pub fn normalized_translation(&self) -> String {
        normalize(&self.translated_text())
    }

    pub fn add_warning(&mut self, checker: &'static str, message: impl Into<String>) {
        self.findings.push(Finding::warning(checker, message));
    }

    pub fn add_error(&mut self, checker: &'static str, message: impl Into<String>) {
        self.findings.push(Finding::error(checker, message));
    }

    /// Findings in the order checkers added them.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Terms listed with `nbsp-ignore:`term`` in translator comments.
    pub fn nbsp_exempt_terms(&self) -> Vec<&str> {
        self.translator_comments
            .iter()
            .flat_map(|comment| NBSP_IGNORE_MARKER.captures_iter(comment))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Whether `line` falls within the entry's line range.
    pub fn contains_line(&self, line: usize) -> bool {
        self.line_start <= line && line <= self.line_end
    }
}

/// A parsed catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub path: PathBuf,
    pub entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(path: impl Into<PathBuf>, entries: Vec<Entry>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    pub fn display_path(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    pub fn finding_count(&self) -> usize {
        self.entries.iter().map(|e| e.findings().len()).sum()
    }
}
