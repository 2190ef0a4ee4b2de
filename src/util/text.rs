use std::borrow::Cow;

/// Escapes text for use inside Telegram HTML markup.
///
/// Telegram's HTML parse mode only recognises `&lt;`, `&gt;`, `&amp;` and
/// `&quot;`, so this is deliberately narrower than a general HTML escaper.
/// Returns `Cow::Borrowed` when nothing needs escaping.
///
/// # Examples
///
/// ```
/// use feedcast::util::escape_html;
///
/// assert_eq!(escape_html("Plain title"), "Plain title");
/// assert_eq!(escape_html("Love & <Fear>"), "Love &amp; &lt;Fear&gt;");
/// ```
pub fn escape_html(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

/// Escapes text for use inside a double-quoted HTML attribute value.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

fn escape(s: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');

    if !s.contains(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Removes control characters that Telegram rejects, keeping `\n` and `\t`.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect(),
    )
}
