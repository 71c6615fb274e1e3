//! Source normalization ahead of translation and embedding.

use log::trace;

use vizdoc_core::grammar::GrammarKind;

/// Diagram text in the canonical form of its grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSource {
    kind: GrammarKind,
    text: String,
}

impl NormalizedSource {
    pub fn kind(&self) -> GrammarKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Strips surrounding whitespace and any leading byte-order marks.
fn trim_source(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .trim_end()
}

/// Returns the word after `@start`, e.g. `mindmap` for `@startmindmap`.
fn start_word(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("@start")?;
    let len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

/// Brings `text` into canonical form for `kind`.
///
/// Every grammar loses surrounding whitespace and a leading byte-order mark.
/// PlantUML sources additionally get a `@startuml` line when they lack a
/// `@start…` prefix, and a `@end…` line matching the start marker when their
/// last line is not an end marker. Normalizing twice gives the same result
/// as normalizing once.
///
/// # Examples
///
/// ```
/// use vizdoc_core::grammar::GrammarKind;
/// use vizdoc_parser::normalize;
///
/// let source = normalize("  Alice -> Bob\n", GrammarKind::PlantUml);
/// assert_eq!(source.text(), "@startuml\nAlice -> Bob\n@enduml");
/// ```
pub fn normalize(text: &str, kind: GrammarKind) -> NormalizedSource {
    let trimmed = trim_source(text);

    let text = match kind {
        GrammarKind::Mermaid | GrammarKind::Graphviz => trimmed.to_string(),
        GrammarKind::PlantUml => {
            let mut out = String::with_capacity(trimmed.len() + 20);

            let word = match start_word(trimmed) {
                Some(word) => word.to_string(),
                None => {
                    trace!("Inserting @startuml marker");
                    out.push_str("@startuml");
                    if !trimmed.is_empty() {
                        out.push('\n');
                    }
                    "uml".to_string()
                }
            };
            out.push_str(trimmed);

            let ends_with_marker = out
                .lines()
                .last()
                .is_some_and(|line| line.trim_start().starts_with("@end"));
            if !ends_with_marker {
                trace!(word = word.as_str(); "Inserting @end marker");
                out.push_str("\n@end");
                out.push_str(&word);
            }
            out
        }
    };

    NormalizedSource { kind, text }
}
