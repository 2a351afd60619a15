//! polint - linter for gettext translation catalogs
//!
//! polint parses `.po` catalogs, runs a fixed set of checkers on every
//! translated entry (double spaces, fuzzy and empty entries, glossary terms,
//! line length, French non-breakable spaces, grammar and spelling through an
//! external engine) and reports findings, optionally restricted to the entries
//! touched by a patch.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog model, parsers, scoping, reporting and the checking pipeline
//! - `issues`: Finding and issue types
//! - `rules`: The checkers and their registry
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
