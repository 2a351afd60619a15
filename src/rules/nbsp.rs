//! Non-breakable spaces required by French typography.
//!
//! Two rules, both run on the normalized translation:
//!
//! - the inside of `«` and `»` must be separated from the quoted text by a
//!   non-breakable space;
//! - `?`, `!`, `:` and `;` must be preceded by a non-breakable space.
//!
//! Only U+00A0 and the narrow U+202F count: a regular space is reported too,
//! since it lets the line break before the sign.
//!
//! The second rule ignores quoted spans and URL schemes, and can be silenced
//! per entry with a `nbsp-ignore:`term`` translator comment.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    core::{catalog::Entry, markup::mask_quoted},
    rules::Checker,
    utils::{byte_to_char, char_slice, context_after, context_before},
};

pub const NAME: &str = "NBSP";

const CONTEXT_WIDTH: usize = 30;

const SIGNS: [char; 4] = ['?', '!', ':', ';'];

/// Anything but a non-breakable space.
const NOT_NBSP: &str = r"[^\u{a0}\u{202f}]";

static OPENING_GUILLEMET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("«{}", NOT_NBSP)).unwrap());
static CLOSING_GUILLEMET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("{}»", NOT_NBSP)).unwrap());
static UNSPACED_SIGN: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    SIGNS.map(|sign| {
        Regex::new(&format!("{}{}", NOT_NBSP, regex::escape(&sign.to_string()))).unwrap()
    })
});

/// A sign not preceded by a non-breakable space.
#[derive(Debug, Clone, Copy)]
pub struct UnspacedSign<'a> {
    /// Character right before the sign.
    pub preceding: char,
    pub sign: char,
    /// Up to 30 characters before `preceding`.
    pub prefix: &'a str,
    /// Up to 30 characters after `sign`.
    pub suffix: &'a str,
}

impl UnspacedSign<'_> {
    /// The matched text with its surrounding context.
    pub fn context(&self) -> String {
        format!("{}{}{}{}", self.prefix, self.preceding, self.sign, self.suffix)
    }
}

type Suppression = fn(&UnspacedSign<'_>, &Entry) -> bool;

/// Any of these returning true drops the candidate.
const SUPPRESSIONS: &[Suppression] = &[follows_punctuation, exempted_by_comment];

/// `?!`, `...:` and the like.
fn follows_punctuation(candidate: &UnspacedSign<'_>, _entry: &Entry) -> bool {
    matches!(candidate.preceding, ':' | '?' | '!' | '.')
}

fn exempted_by_comment(candidate: &UnspacedSign<'_>, entry: &Entry) -> bool {
    let context = candidate.context();
    entry
        .nbsp_exempt_terms()
        .iter()
        .any(|term| context.contains(term))
}

/// `https://` must not look like a colon glued to a word.
fn escape_url_schemes(text: &str) -> String {
    text.replace("http://", "http-//")
        .replace("https://", "https-//")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NbspChecker;

impl NbspChecker {
    fn guillemet_errors(text: &str) -> Vec<String> {
        [&*OPENING_GUILLEMET, &*CLOSING_GUILLEMET]
            .into_iter()
            .flat_map(|pattern| pattern.find_iter(text))
            .map(|m| {
                format!(
                    "Space should be replaced with a non-breakable space in \"{}\": between ###{}### and ###{}###",
                    m.as_str(),
                    context_before(text, m.start(), CONTEXT_WIDTH),
                    context_after(text, m.end(), CONTEXT_WIDTH),
                )
            })
            .collect()
    }

    fn sign_errors(text: &str, entry: &Entry) -> Vec<String> {
        // Same character count as `text`, so character offsets carry over.
        let masked = escape_url_schemes(&mask_quoted(text));
        let mut errors = Vec::new();

        for (sign, pattern) in SIGNS.iter().zip(UNSPACED_SIGN.iter()) {
            for m in pattern.find_iter(&masked) {
                let at = byte_to_char(&masked, m.start());
                let Some(preceding) = char_slice(text, at, at + 1).chars().next() else {
                    continue;
                };
                let candidate = UnspacedSign {
                    preceding,
                    sign: *sign,
                    prefix: char_slice(text, at.saturating_sub(CONTEXT_WIDTH), at),
                    suffix: char_slice(text, at + 2, at + 2 + CONTEXT_WIDTH),
                };
                if SUPPRESSIONS.iter().any(|suppress| suppress(&candidate, entry)) {
                    continue;
                }
                errors.push(format!(
                    "There should be a non-breakable space before \"{}\": between ###{}{}### and ###{}{}###",
                    candidate.sign,
                    candidate.prefix,
                    candidate.preceding,
                    candidate.sign,
                    candidate.suffix,
                ));
            }
        }
        errors
    }
}

impl Checker for NbspChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check_entry(&self, entry: &mut Entry) {
        let text = entry.normalized_translation();
        let mut errors = Self::guillemet_errors(&text);
        errors.extend(Self::sign_errors(&text, entry));
        for error in errors {
            entry.add_error(NAME, error);
        }
    }
}
