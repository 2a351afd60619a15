//! Checker construction and isolated execution.

use std::sync::Arc;

use tracing::{error, trace};

use crate::{
    config::Config,
    core::{
        catalog::Catalog,
        dictionary::PersonalDictionary,
        error::{CheckError, DictionaryError},
        glossary::Glossary,
    },
    rules::{
        BuiltinChecker, Checker,
        double_space::DoubleSpaceChecker,
        empty::EmptyChecker,
        fuzzy::FuzzyChecker,
        glossary::GlossaryChecker,
        grammar::{GrammalecteCli, GrammarChecker, GrammarEngine},
        line_length::LineLengthChecker,
        nbsp::NbspChecker,
    },
};

/// A checker that failed on a catalog. The other checkers still ran.
#[derive(Debug)]
pub struct CheckFailure {
    pub checker: &'static str,
    pub error: CheckError,
}

/// Ordered list of the checkers to run on every catalog.
pub struct CheckerRegistry {
    checkers: Vec<BuiltinChecker>,
}

impl CheckerRegistry {
    pub fn new(checkers: Vec<BuiltinChecker>) -> Self {
        Self { checkers }
    }

    /// Every built-in checker, in registration order. Without an engine the
    /// grammar checker is left out.
    pub fn builtin(
        max_line_length: usize,
        glossary: Arc<Glossary>,
        grammar: Option<(Box<dyn GrammarEngine>, Arc<PersonalDictionary>)>,
    ) -> Self {
        let mut checkers: Vec<BuiltinChecker> = vec![
            DoubleSpaceChecker.into(),
            EmptyChecker.into(),
            FuzzyChecker.into(),
        ];
        if let Some((engine, dictionary)) = grammar {
            checkers.push(GrammarChecker::new(engine, glossary.clone(), dictionary).into());
        }
        checkers.push(GlossaryChecker::new(glossary).into());
        checkers.push(LineLengthChecker::new(max_line_length).into());
        checkers.push(NbspChecker.into());
        Self::new(checkers)
    }

    /// Registry described by the configuration. Personal dictionaries are only
    /// loaded when the grammar checker runs.
    pub fn from_config(config: &Config, with_grammar: bool) -> Result<Self, DictionaryError> {
        let glossary = Arc::new(Glossary::with_extra(&config.glossary));
        let grammar = if with_grammar && config.grammar.enabled {
            let dictionary =
                PersonalDictionary::load(&config.personal_dictionaries, &config.personal_words)?;
            let engine: Box<dyn GrammarEngine> =
                Box::new(GrammalecteCli::from_config(&config.grammar));
            Some((engine, Arc::new(dictionary)))
        } else {
            None
        };
        Ok(Self::builtin(config.max_line_length, glossary, grammar))
    }

    pub fn checkers(&self) -> &[BuiltinChecker] {
        &self.checkers
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }

    /// Run every checker on the catalog. A failing checker is logged and
    /// skipped; the findings it added before failing are kept.
    pub fn run(&self, catalog: &mut Catalog) -> Vec<CheckFailure> {
        let mut failures = Vec::new();
        for checker in &self.checkers {
            trace!(checker = checker.name(), path = %catalog.path.display(), "running checker");
            if let Err(err) = checker.check_catalog(catalog) {
                error!(
                    checker = checker.name(),
                    path = %catalog.path.display(),
                    error = %err,
                    "checker failed"
                );
                failures.push(CheckFailure {
                    checker: checker.name(),
                    error: err,
                });
            }
        }
        failures
    }
}
