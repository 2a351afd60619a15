//! Checkers for translated catalogs.
//!
//! Every checker implements [`Checker`] and is registered as a variant of
//! [`BuiltinChecker`]. The registry runs them in a fixed order; findings are
//! attached to the entries they concern.
//!
//! ## Module Structure
//!
//! - `double_space`: runs of whitespace in translations
//! - `empty`: entries without translation
//! - `fuzzy`: entries tagged as fuzzy
//! - `grammar`: grammar and spelling through an external engine
//! - `glossary`: glossary terms translated with an unexpected word
//! - `line_length`: physical lines longer than the configured limit
//! - `nbsp`: missing non-breakable spaces around French punctuation
//! - `registry`: checker construction and isolated execution

pub mod double_space;
pub mod empty;
pub mod fuzzy;
pub mod glossary;
pub mod grammar;
pub mod line_length;
pub mod nbsp;
pub mod registry;

use enum_dispatch::enum_dispatch;

pub use registry::{CheckFailure, CheckerRegistry};

use crate::core::{
    catalog::{Catalog, Entry},
    error::CheckError,
};
use double_space::DoubleSpaceChecker;
use empty::EmptyChecker;
use fuzzy::FuzzyChecker;
use glossary::GlossaryChecker;
use grammar::GrammarChecker;
use line_length::LineLengthChecker;
use nbsp::NbspChecker;

/// A checker known to the registry.
#[enum_dispatch(Checker)]
pub enum BuiltinChecker {
    DoubleSpace(DoubleSpaceChecker),
    Empty(EmptyChecker),
    Fuzzy(FuzzyChecker),
    Grammar(GrammarChecker),
    Glossary(GlossaryChecker),
    LineLength(LineLengthChecker),
    Nbsp(NbspChecker),
}

/// A named check over catalog entries.
///
/// Most checkers look at one entry at a time and only implement
/// [`Checker::check_entry`]. Checkers that need the whole catalog at once,
/// like the grammar checker, override [`Checker::check_catalog`].
#[enum_dispatch]
pub trait Checker {
    /// Label attached to every finding of this checker.
    fn name(&self) -> &'static str;

    /// Inspect one entry and attach findings to it.
    fn check_entry(&self, entry: &mut Entry);

    fn check_catalog(&self, catalog: &mut Catalog) -> Result<(), CheckError> {
        for entry in &mut catalog.entries {
            self.check_entry(entry);
        }
        Ok(())
    }
}
