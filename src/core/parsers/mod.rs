//! File parsers.
//!
//! - `po`: gettext catalog parser (entries with their line ranges)
//! - `diff`: unified diff parser (hunk headers and per-file patches)

pub mod diff;
pub mod po;
