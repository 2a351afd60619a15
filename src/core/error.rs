//! Error taxonomy of the checking pipeline.
//!
//! - `ParseError`: the catalog could not be read or is malformed. Fatal for
//!   that file only.
//! - `EngineError`: the external grammar engine is missing, timed out, or
//!   answered something we could not decode. Fatal for the grammar checker
//!   only.
//! - `DictionaryError`: a personal dictionary source could not be loaded.
//!
//! A diff without any hunk touching a file is not an error: the file simply
//! has nothing in scope.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("catalog {path:?} is not valid UTF-8")]
    Encoding { path: PathBuf },

    #[error("{path:?}:{line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine executable could not be started.
    #[error("grammar engine `{program}` is unavailable: {reason}")]
    Unavailable { program: String, reason: String },

    /// The engine answered, but not in the expected format.
    #[error("unexpected answer from grammar engine: {0}")]
    Protocol(String),

    #[error("grammar engine did not answer within {secs}s")]
    Timeout { secs: u64 },

    #[error("grammar engine I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read personal dictionary {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to download personal dictionary {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure of one checker on one catalog.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}
