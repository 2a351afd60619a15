//! Core checking engine.
//!
//! ## Module Structure
//!
//! - `catalog`: in-memory catalog model (entries, line ranges, findings)
//! - `parsers`: `.po` and unified diff parsers
//! - `markup`: reStructuredText normalization used by the checkers
//! - `glossary` / `dictionary`: reference data injected into checkers
//! - `scope`: which entries a patch touches
//! - `report`: surfacing findings of in-scope entries
//! - `scanner`: finding catalogs on disk
//! - `pipeline`: parse, check and report many files
//! - `error`: error taxonomy

pub mod catalog;
pub mod dictionary;
pub mod error;
pub mod glossary;
pub mod markup;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod scope;

pub use catalog::{Catalog, Entry};
pub use error::{CheckError, DictionaryError, EngineError, ParseError};
pub use pipeline::{CheckOutcome, check_catalog, check_file, check_paths};
pub use report::{Report, report};
pub use scope::{PullRequestInfo, tag_scope};
