//! Glossary terms translated with something other than an accepted word.

use std::sync::Arc;

use crate::{
    core::{catalog::Entry, glossary::Glossary, markup::strip_quoted},
    rules::Checker,
    utils::quote_alternatives,
};

pub const NAME: &str = "Glossary";

#[derive(Debug, Clone)]
pub struct GlossaryChecker {
    glossary: Arc<Glossary>,
}

impl GlossaryChecker {
    pub fn new(glossary: Arc<Glossary>) -> Self {
        Self { glossary }
    }
}

impl Checker for GlossaryChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    /// Terms are looked up in the normalized source, outside quoted spans,
    /// and their translations in the raw translated text.
    fn check_entry(&self, entry: &mut Entry) {
        let translated = entry.translated_text();
        if translated.is_empty() {
            return;
        }
        let source = strip_quoted(&entry.normalized_source());

        for term in self.glossary.terms() {
            if term.found_in(&source) && !term.translated_in(&translated) {
                entry.add_warning(
                    NAME,
                    format!(
                        "Found {} that is not translated in {} in ###{}###.",
                        term.term,
                        quote_alternatives(&term.translations),
                        translated
                    ),
                );
            }
        }
    }
}
