//! HTML escaping and query highlighting for search results

pub const MARK_OPEN: &str = "<mark class=\"bg-warning\">";
pub const MARK_CLOSE: &str = "</mark>";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte length of a case-insensitive match of `query` at the start of `text`
fn match_len_at(text: &str, query: &[char]) -> Option<usize> {
    let mut chars = text.chars();
    let mut len = 0;
    for q in query {
        let c = chars.next()?;
        if !chars_eq_ignore_case(c, *q) {
            return None;
        }
        len += c.len_utf8();
    }
    Some(len)
}

/// Case-insensitive substring test, char by char so `Å`/`å` match
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return true;
    }
    haystack
        .char_indices()
        .any(|(i, _)| match_len_at(&haystack[i..], &needle).is_some())
}

/// Escape `text` and wrap every case-insensitive occurrence of `query` in a
/// `<mark>`. Matching runs on the raw text, so a query containing `<` or `&`
/// still lines up with what the user sees.
pub fn highlight(text: &str, query: &str) -> String {
    let query: Vec<char> = query.chars().collect();
    if query.is_empty() || text.is_empty() {
        return escape_html(text);
    }

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    let mut i = 0;
    while i < text.len() {
        if let Some(len) = match_len_at(&text[i..], &query) {
            out.push_str(&escape_html(&text[last..i]));
            out.push_str(MARK_OPEN);
            out.push_str(&escape_html(&text[i..i + len]));
            out.push_str(MARK_CLOSE);
            i += len;
            last = i;
        } else {
            i += text[i..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
    }
    out.push_str(&escape_html(&text[last..]));
    out
}
