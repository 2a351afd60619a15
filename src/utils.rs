//! Common utility functions shared across the codebase.

/// Converts a byte offset of `text` into a character index.
pub fn byte_to_char(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Returns the substring between two character indices.
///
/// Indices past the end of the text are clamped.
///
/// # Examples
///
/// ```
/// use polint::utils::char_slice;
///
/// assert_eq!(char_slice("défaut", 1, 4), "éfa");
/// assert_eq!(char_slice("abc", 1, 10), "bc");
/// assert_eq!(char_slice("abc", 5, 10), "");
/// ```
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let to_byte = |index: usize| {
        text.char_indices()
            .nth(index)
            .map(|(byte, _)| byte)
            .unwrap_or(text.len())
    };
    let start = to_byte(start);
    let end = to_byte(end).max(start);
    &text[start..end]
}

/// Up to `width` characters ending at byte offset `byte`.
pub fn context_before(text: &str, byte: usize, width: usize) -> &str {
    let head = &text[..byte];
    let count = head.chars().count();
    char_slice(head, count.saturating_sub(width), count)
}

/// Up to `width` characters starting at byte offset `byte`.
pub fn context_after(text: &str, byte: usize, width: usize) -> &str {
    char_slice(&text[byte..], 0, width)
}

/// Joins alternatives as `"a", "b" or "c"`.
///
/// # Examples
///
/// ```
/// use polint::utils::quote_alternatives;
///
/// assert_eq!(quote_alternatives(&["bogue"]), r#""bogue""#);
/// assert_eq!(quote_alternatives(&["a", "b", "c"]), r#""a", "b" or "c""#);
/// ```
pub fn quote_alternatives<S: AsRef<str>>(alternatives: &[S]) -> String {
    let quoted: Vec<String> = alternatives
        .iter()
        .map(|alt| format!("\"{}\"", alt.as_ref()))
        .collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Title-cases a word: the first letter of every alphabetic run is upper
/// case, the other letters lower case.
pub fn title_case(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut previous_is_alphabetic = false;
    for c in word.chars() {
        if previous_is_alphabetic {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_alphabetic = c.is_alphabetic();
    }
    result
}
