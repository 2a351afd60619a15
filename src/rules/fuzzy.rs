use crate::{core::catalog::Entry, rules::Checker};

pub const NAME: &str = "Fuzzy";

/// Flags entries carrying the `fuzzy` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyChecker;

impl Checker for FuzzyChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check_entry(&self, entry: &mut Entry) {
        if entry.fuzzy {
            entry.add_warning(NAME, "This entry is tagged as fuzzy.");
        }
    }
}
