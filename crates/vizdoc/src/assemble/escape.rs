//! Escaping for text embedded into documents.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(script)").expect("SCRIPT_CLOSE_RE regex pattern is valid")
});

/// Quotes `text` as a JavaScript string literal safe inside a `<script>`
/// element.
///
/// The literal is JSON string syntax with `<`, U+2028 and U+2029 additionally
/// written as `\uXXXX`, so it can neither close the script element nor break
/// older parsers. A JSON or JavaScript parser reads back exactly `text`.
pub fn script_literal(text: &str) -> String {
    let json = serde_json::Value::String(text.to_owned()).to_string();

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes `text` for HTML element content.
///
/// Only `&` and `<` are replaced, which is enough to keep text inert while
/// leaving diagram syntax such as `A -> B` readable in the page source.
pub fn html_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            c => out.push(c),
        }
    }
    out
}

/// Defuses `</script` sequences, in any letter case, in script source
/// embedded verbatim. The tag name keeps its original case.
pub fn script_source(source: &str) -> String {
    SCRIPT_CLOSE_RE.replace_all(source, r"<\/$1").into_owned()
}
