//! Quote stripping and `target=payload` splitting for flag values.

/// Remove one layer of matching single or double quotes.
///
/// ```rust
/// use conftree::strip_quotes;
///
/// assert_eq!(strip_quotes("'here it is'"), "here it is");
/// assert_eq!(strip_quotes("\"'nested'\""), "'nested'");
/// assert_eq!(strip_quotes("'unbalanced\""), "'unbalanced\"");
/// ```
#[must_use]
pub fn strip_quotes(raw: &str) -> &str {
    if raw.len() < 2 {
        return raw;
    }
    ['\'', '"']
        .into_iter()
        .find_map(|quote| raw.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(raw)
}

/// Byte offset of the first `=` outside quotes and outside `{}`/`[]` nesting.
fn top_level_equals(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (at, ch) in text.char_indices() {
        match (quote, ch) {
            (Some(open), _) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '{' | '[') => depth += 1,
            (None, '}' | ']') => depth = depth.saturating_sub(1),
            (None, '=') if depth == 0 => return Some(at),
            (None, _) => {}
        }
    }
    None
}

/// Split a raw flag value into `(target, payload)`.
///
/// One outer quote layer is removed from the whole value first. The result
/// is then split at its first top-level `=`, and each side loses one more
/// quote layer, so `'x=y'` and `x='y'` both give `("x", "y")`. Without an
/// `=` the target is empty and the whole value is the payload.
///
/// ```rust
/// use conftree::split_target_payload;
///
/// assert_eq!(split_target_payload("'x=y'"), ("x", "y"));
/// assert_eq!(split_target_payload("x='y'"), ("x", "y"));
/// assert_eq!(split_target_payload("conf/app.yml"), ("", "conf/app.yml"));
/// assert_eq!(split_target_payload("{a: b=c}"), ("", "{a: b=c}"));
/// ```
#[must_use]
pub fn split_target_payload(raw: &str) -> (&str, &str) {
    let value = strip_quotes(raw);
    match top_level_equals(value) {
        Some(at) => {
            let (target, rest) = value.split_at(at);
            let payload = rest.strip_prefix('=').unwrap_or(rest);
            (strip_quotes(target), strip_quotes(payload))
        }
        None => ("", value),
    }
}
