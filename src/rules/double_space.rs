//! Runs of two or more whitespace characters in a translation.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    core::catalog::Entry,
    rules::Checker,
    utils::{context_after, context_before},
};

pub const NAME: &str = "Double space";

/// Characters of context shown on each side of a run.
const CONTEXT_WIDTH: usize = 30;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSpaceChecker;

impl Checker for DoubleSpaceChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    /// One warning per maximal run, on the normalized translation.
    fn check_entry(&self, entry: &mut Entry) {
        let text = entry.normalized_translation();
        for run in WHITESPACE_RUN.find_iter(&text) {
            entry.add_warning(
                NAME,
                format!(
                    "Double spaces detected between ###{}### and ###{}###",
                    context_before(&text, run.start(), CONTEXT_WIDTH),
                    context_after(&text, run.end(), CONTEXT_WIDTH),
                ),
            );
        }
    }
}
