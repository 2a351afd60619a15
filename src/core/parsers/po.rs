use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{
    catalog::{Catalog, Entry},
    error::ParseError,
};

/// Prefix of the reference comment that opens every entry.
const REFERENCE_PREFIX: &str = "#: ";

/// Which string of the entry continuation lines belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// No keyword line seen yet in this entry.
    None,
    Context,
    Source,
    SourcePlural,
    Translated,
    /// `msgstr[n]` with `n > 0`.
    OtherPlural,
}

/// Parse a `.po` file into a catalog.
///
/// The whole file is read at once and must be UTF-8.
pub fn parse_po_file(path: &Path) -> Result<Catalog, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| ParseError::Encoding {
        path: path.to_path_buf(),
    })?;
    parse_po_str(path, &content)
}

/// Parse catalog content already loaded in memory.
///
/// Every line starting with `#: ` opens a new entry; the previous entry ends
/// on the line before. Lines before the first reference comment (the catalog
/// header) belong to no entry, and the last entry extends to the end of the file.
pub fn parse_po_str(path: impl Into<PathBuf>, content: &str) -> Result<Catalog, ParseError> {
    let path = path.into();
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut entries: Vec<Entry> = Vec::new();
    let mut current: Option<(Entry, Segment)> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_end();

        if let Some(reference) = line.strip_prefix(REFERENCE_PREFIX) {
            if let Some((entry, _)) = current.take() {
                entries.push(entry);
            }
            current = Some((Entry::new(reference, line_number), Segment::None));
            continue;
        }

        let Some((entry, segment)) = current.as_mut() else {
            continue;
        };
        entry.line_end = line_number;

        if line.starts_with('"') {
            let text = unquote(line).ok_or_else(|| malformed(&path, line_number, line))?;
            match segment {
                Segment::Source => entry.msgid.push(text.to_string()),
                Segment::Translated => entry.msgstr.push(text.to_string()),
                _ => {}
            }
        } else if line.starts_with("msg") {
            let (keyword, rest) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));
            let text = unquote(rest).ok_or_else(|| malformed(&path, line_number, line))?;
            *segment = match keyword {
                "msgctxt" => Segment::Context,
                "msgid" => {
                    entry.msgid.push(text.to_string());
                    Segment::Source
                }
                "msgid_plural" => Segment::SourcePlural,
                "msgstr" | "msgstr[0]" => {
                    entry.msgstr.push(text.to_string());
                    Segment::Translated
                }
                keyword if keyword.starts_with("msgstr[") => Segment::OtherPlural,
                _ => {
                    return Err(ParseError::Malformed {
                        path,
                        line: line_number,
                        reason: format!("unknown keyword `{}`", keyword),
                    });
                }
            };
        } else if let Some(flags) = line.strip_prefix("#,") {
            if flags.split(',').any(|flag| flag.trim() == "fuzzy") {
                entry.fuzzy = true;
            }
        } else if line == "#" {
            entry.translator_comments.push(String::new());
        } else if let Some(comment) = line.strip_prefix("# ") {
            entry.translator_comments.push(comment.to_string());
        }
    }

    if let Some((entry, _)) = current.take() {
        entries.push(entry);
    }

    Ok(Catalog::new(path, entries))
}

/// Content of a `"…"` string, without the surrounding quotes.
fn unquote(text: &str) -> Option<&str> {
    text.trim()
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
}

fn malformed(path: &Path, line: usize, content: &str) -> ParseError {
    ParseError::Malformed {
        path: path.to_path_buf(),
        line,
        reason: format!("expected a quoted string in `{}`", content),
    }
}
