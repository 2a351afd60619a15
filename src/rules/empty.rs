use crate::{core::catalog::Entry, rules::Checker};

pub const NAME: &str = "Empty";

/// Flags entries with a source text but no translation yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyChecker;

impl Checker for EmptyChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check_entry(&self, entry: &mut Entry) {
        if !entry.source_text().is_empty() && entry.translated_text().is_empty() {
            entry.add_warning(NAME, "This entry is not translated yet.");
        }
    }
}
