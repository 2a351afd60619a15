//! reStructuredText to comparable plain text.
//!
//! Translations of Sphinx documentation carry lightweight markup (inline
//! literals, roles, emphasis, hyperlinks). Checkers compare text, not markup,
//! so every marked-up span is rewritten as a guillemet-quoted span `« … »`
//! that later stages can treat as one opaque token. The guillemets are
//! separated from their content by non-breakable spaces, as French
//! typography requires.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Character used to blank out the content of quoted spans.
pub const PLACEHOLDER: char = 'x';

/// No-break space, U+00A0.
pub const NBSP: char = '\u{a0}';

/// Roles rendered as quoted spans. `:pep:` is handled separately.
const QUOTED_ROLES: &[&str] = &[
    "attr", "class", "const", "data", "dfn", "exc", "file", "func", "keyword", "meth", "mod",
    "ref", "source", "term",
];

static DOUBLE_COLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"::").unwrap());
static INLINE_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"``(.*?)``").unwrap());
static PEP_ROLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":pep:`(.*?)`").unwrap());
static QUOTED_ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r":(?:{}):`(.*?)`", QUOTED_ROLES.join("|"))).unwrap()
});
static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static HYPERLINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`<]*?)\s*<([^<>`]+)>`__?").unwrap());
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-z][a-z0-9+.-]*://[^<>\s]+)>").unwrap());
static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"«(\s)(.*?)(\s)»").unwrap());

/// Rewrites markup into guillemet-quoted plain text.
///
/// # Examples
///
/// ```
/// use polint::core::markup::normalize;
///
/// assert_eq!(normalize("``x``"), "«\u{a0}x\u{a0}»");
/// assert_eq!(normalize("**x**"), "«\u{a0}x\u{a0}»");
/// assert_eq!(normalize("a::b"), "a:b");
/// assert_eq!(normalize(":pep:`8`"), "PEP 8");
/// ```
pub fn normalize(text: &str) -> String {
    let text = DOUBLE_COLON.replace_all(text, ":");
    let text = INLINE_LITERAL.replace_all(&text, quoted("${1}"));
    let text = PEP_ROLE.replace_all(&text, "PEP ${1}");
    let text = QUOTED_ROLE.replace_all(&text, quoted("${1}"));
    let text = STRONG.replace_all(&text, quoted("${1}"));
    let text = EMPHASIS.replace_all(&text, quoted("${1}"));
    let text = HYPERLINK.replace_all(&text, format!("${{1}} ({})", quoted("${2}")));
    let text = BARE_URL.replace_all(&text, quoted("${1}"));
    text.into_owned()
}

/// `«\u{a0}inner\u{a0}»`.
fn quoted(inner: &str) -> String {
    format!("«{NBSP}{inner}{NBSP}»")
}

/// Replaces the content of every `« … »` span with placeholder characters.
///
/// The spaces around the content are kept as they are, and the result has
/// exactly as many characters as the input, so character offsets computed on
/// the masked text are valid on the original.
pub fn mask_quoted(text: &str) -> String {
    QUOTED_SPAN
        .replace_all(text, |caps: &Captures| {
            let inner = caps[2].chars().count();
            format!(
                "«{}{}{}»",
                &caps[1],
                PLACEHOLDER.to_string().repeat(inner),
                &caps[3]
            )
        })
        .into_owned()
}

/// Removes every `« … »` span.
pub fn strip_quoted(text: &str) -> String {
    QUOTED_SPAN.replace_all(text, "").into_owned()
}
