//! Terms with an agreed translation.
//!
//! The built-in table follows the python-docs-fr contributing guide; projects
//! extend it through the `glossary` key of the configuration.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};

const BUILTIN_GLOSSARY: &[(&str, &[&str])] = &[
    ("-like", &["-compatible"]),
    ("abstract data type", &["type abstrait"]),
    ("argument", &["argument"]),
    ("backslash", &["antislash", "*backslash*", "*backslashes*"]),
    (
        "backtrace",
        &["trace d'appels", "trace de pile", "traces d'appels", "traces de pile"],
    ),
    ("big-endian", &["gros-boutiste"]),
    ("bound", &["lié"]),
    ("bug", &["bogue", "*bug*", "*bugs*"]),
    ("built-in", &["native"]),
    ("callback", &["fonction de rappel", "fonctions de rappel"]),
    ("call stack", &["pile d'appels"]),
    ("debugging", &["débogage"]),
    ("deep copy", &["copie récursive", "copie profonde"]),
    ("double quote", &["guillemet"]),
    ("deprecated", &["obsolète"]),
    ("e.g.", &["p. ex.", "par exemple"]),
    ("et al.", &["et autre", "et ailleurs"]),
    ("export", &["exporter", "exportation"]),
    ("expression", &["expression"]),
    ("garbage collector", &["ramasse-miettes"]),
    ("getter", &["accesseur"]),
    ("i.e", &["c.-à-d.", "c'est-à-dire"]),
    ("identifier", &["identifiant"]),
    ("immutable", &["immuable"]),
    ("import", &["importer", "importation"]),
    ("installer", &["installateur"]),
    ("interpreter", &["interpréteur"]),
    ("library", &["bibliothèque"]),
    ("libraries", &["bibliothèques"]),
    ("list comprehension", &["liste en compréhension"]),
    ("little-endian", &["petit-boutiste"]),
    ("mixin type", &["type de mélange"]),
    ("mutable", &["muable"]),
    (
        "namespace",
        &[
            "espace de nommage",
            "espace de noms",
            "espaces de nommage",
            "espaces de noms",
        ],
    ),
    ("parameter", &["paramètre"]),
    ("pickle", &["sérialiser"]),
    ("prompt", &["invite"]),
    ("raise", &["lever", "levé"]),
    (
        "regular expression",
        &[
            "expression rationnelle",
            "expressions rationnelles",
            "expression régulière",
            "expressions régulières",
        ],
    ),
    ("return", &["renvoie", "renvoyé"]),
    ("setter", &["mutateur"]),
    ("simple quote", &["guillemet simple", "guillemets simples"]),
    (
        "socket",
        &["connecteur", "interface de connexion", "interfaces de connexion"],
    ),
    ("statement", &["instruction"]),
    ("subprocess", &["sous-processus"]),
    ("thread", &["fil d'exécution", "fils d'exécution"]),
    (
        "traceback",
        &["trace d'appels", "trace de pile", "traces d'appels", "traces de pile"],
    ),
    ("underscore", &["tiret bas", "*underscore*"]),
    ("whitespace", &["caractère d'espacement", "caractères d'espacement"]),
    (
        "abstract base class",
        &["classe de base abstraite", "classes de base abstraites"],
    ),
    ("annotation", &["annotation"]),
    (
        "asynchronous context manager",
        &[
            "gestionnaire de contexte asynchrone",
            "gestionnaires de contexte asynchrone",
        ],
    ),
    (
        "asynchronous generator",
        &["générateur asynchrone", "générateurs asynchrones"],
    ),
    (
        "asynchronous iterable",
        &["itérable asynchrone", "itérables asynchrones"],
    ),
    ("asynchronous", &["asynchrone"]),
    ("attribute", &["attribut"]),
    ("awaitable", &["*awaitable*"]),
    ("BDFL", &["*BDFL*"]),
    ("binary file", &["fichier binaire", "fichiers binaires"]),
    (
        "bytes-like object",
        &["objet octet-compatible", "objets octet-compatible"],
    ),
    ("bytecode", &["code intermédiaire", "*bytecode*"]),
    ("class", &["classe"]),
    ("class variable", &["variable de classe", "variables de classe"]),
    ("coercion", &["coercition"]),
    ("complex number", &["nombre complexe", "nombres complexes"]),
    (
        "context manager",
        &["gestionnaire de contexte", "gestionnaires de contexte"],
    ),
    (
        "context variable",
        &["variable de contexte", "variables de contexte"],
    ),
    ("contiguous", &["contigu"]),
    ("coroutine", &["coroutine"]),
    ("CPython", &["CPython"]),
    ("decorator", &["décorateur"]),
    ("descriptor", &["descripteur"]),
    ("dictionary", &["dictionnaire"]),
    (
        "dictionary view",
        &["vue de dictionnaire", "vues de dictionnaire"],
    ),
    (
        "docstring",
        &[
            "*docstring*",
            "*docstrings*",
            "chaîne de documentation",
            "chaînes de documentation",
        ],
    ),
    ("duck-typing", &["*duck-typing*"]),
    (
        "extension module",
        &["module d'extension", "modules d'extension"],
    ),
    ("f-string", &["f-string"]),
    ("file object", &["objet fichier", "objets fichier"]),
    (
        "file-like object",
        &["objet fichier-compatible", "objets fichier-compatible"],
    ),
    ("finder", &["chercheur"]),
    ("floor division", &["division entière", "divisions entières"]),
    ("function", &["fonction"]),
    (
        "function annotation",
        &["annotation de fonction", "annotations de fonction"],
    ),
    ("__future__", &["__future__"]),
    ("garbage collection", &["ramasse-miettes"]),
    ("generator", &["générateur"]),
    ("iterator", &["itérateur"]),
];

/// One glossary term and its accepted translations.
#[derive(Debug, Clone)]
pub struct GlossaryTerm {
    pub term: String,
    pub translations: Vec<String>,
    /// Case-insensitive, anchored on a leading word boundary.
    pattern: Option<Regex>,
}

impl GlossaryTerm {
    pub fn new(term: impl Into<String>, translations: Vec<String>) -> Self {
        let term = term.into();
        let pattern = RegexBuilder::new(&format!(r"\b{}", regex::escape(&term)))
            .case_insensitive(true)
            .build()
            .ok();
        Self {
            term,
            translations,
            pattern,
        }
    }

    /// Whether the term occurs in `text`, starting on a word boundary.
    pub fn found_in(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }

    /// Whether one accepted translation occurs in `text`, ignoring case.
    pub fn translated_in(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.translations
            .iter()
            .any(|translation| text.contains(&translation.to_lowercase()))
    }
}

/// Ordered glossary: built-in terms first, then configured ones.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    terms: Vec<GlossaryTerm>,
}

impl Glossary {
    pub fn builtin() -> Self {
        Self {
            terms: BUILTIN_GLOSSARY
                .iter()
                .map(|(term, translations)| {
                    GlossaryTerm::new(*term, translations.iter().map(|t| t.to_string()).collect())
                })
                .collect(),
        }
    }

    /// Built-in terms extended with `extra`. An extra term that already
    /// exists replaces the built-in translations.
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut glossary = Self::builtin();
        for (term, translations) in extra {
            match glossary
                .terms
                .iter_mut()
                .find(|t| t.term.eq_ignore_ascii_case(term))
            {
                Some(existing) => existing.translations = translations.clone(),
                None => glossary
                    .terms
                    .push(GlossaryTerm::new(term.clone(), translations.clone())),
            }
        }
        glossary
    }

    pub fn terms(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    /// Case-insensitive lookup of a whole word among the terms.
    pub fn contains_term(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.terms.iter().any(|t| t.term.to_lowercase() == word)
    }
}
