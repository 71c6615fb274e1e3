//! Format detection.
//!
//! Each grammar has a [`FormatDetector`] with a *strong* rule (an indicator
//! no other grammar uses) and optional *weak* rules (hints shared between
//! grammars, such as `participant` lines). [`detect`] runs two passes over
//! [`DETECTION_ORDER`]: first every strong rule, then every weak rule. The
//! first hit wins, so a weak hint never outranks a strong indicator of
//! another grammar.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use vizdoc_core::grammar::{DETECTION_ORDER, GrammarKind};

/// Recognizes one grammar.
pub trait FormatDetector: Send + Sync {
    /// The grammar this detector recognizes.
    fn kind(&self) -> GrammarKind;

    /// Returns `true` if `text` carries an indicator unique to this grammar.
    fn strong_match(&self, text: &str) -> bool;

    /// Returns `true` if `text` carries a hint this grammar shares with others.
    fn weak_match(&self, _text: &str) -> bool {
        false
    }

    /// Returns `true` if `text` looks like this grammar.
    fn is_format(&self, text: &str) -> bool {
        self.strong_match(text) || self.weak_match(text)
    }
}

static MERMAID_DIAGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:(?:graph|flowchart)(?:[ \t]+(?:TB|TD|BT|RL|LR))?[ \t]*(?:;|\r?$)|(?:sequenceDiagram|classDiagram(?:-v2)?|stateDiagram(?:-v2)?|erDiagram|journey|gantt|pie|gitGraph|requirementDiagram|mindmap|timeline|quadrantChart|xychart-beta|sankey-beta|block-beta|packet-beta|architecture-beta|kanban|C4Context|C4Container|C4Component|C4Dynamic|C4Deployment)\b|%%\{[ \t]*init)",
    )
    .expect("MERMAID_DIAGRAM_RE regex pattern is valid")
});

static PLANTUML_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:@(?:start|end)[a-z]+\b|skinparam\b|!theme\b|!include|!define\b)")
        .expect("PLANTUML_DIRECTIVE_RE regex pattern is valid")
});

static PLANTUML_PARTICIPANT_KIND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:boundary|control|entity|database|collections|queue)\b")
        .expect("PLANTUML_PARTICIPANT_KIND_RE regex pattern is valid")
});

static PLANTUML_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:abstract[ \t]+class|class|interface)[ \t]")
        .expect("PLANTUML_CLASS_RE regex pattern is valid")
});

static GRAPHVIZ_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:strict[ \t]+)?(?:di)?graph\b[^{\n]*(?:\n[ \t\r]*)*\{")
        .expect("GRAPHVIZ_HEADER_RE regex pattern is valid")
});

/// A bare `graph` line followed by a `{` line opens a DOT body, not a
/// Mermaid flowchart.
fn opens_dot_body(keyword_line: &str, after: &str) -> bool {
    keyword_line.trim().eq_ignore_ascii_case("graph") && after.trim_start().starts_with('{')
}

fn declares_participant(text: &str) -> bool {
    text.contains("participant ") || text.contains("actor ")
}

/// Mermaid: diagram-kind keyword lines and `%%{init}` directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidDetector;

impl FormatDetector for MermaidDetector {
    fn kind(&self) -> GrammarKind {
        GrammarKind::Mermaid
    }

    fn strong_match(&self, text: &str) -> bool {
        MERMAID_DIAGRAM_RE
            .find_iter(text)
            .any(|found| !opens_dot_body(found.as_str(), &text[found.end()..]))
    }

    /// Participant declarations next to Mermaid-style arrows or labels.
    fn weak_match(&self, text: &str) -> bool {
        declares_participant(text)
            && (text.contains("-->")
                || text.contains("->>")
                || (text.contains("participant ") && (text.contains("as ") || text.contains(':'))))
    }
}

/// PlantUML: `@start`/`@end` markers and preprocessor directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlantUmlDetector;

impl FormatDetector for PlantUmlDetector {
    fn kind(&self) -> GrammarKind {
        GrammarKind::PlantUml
    }

    fn strong_match(&self, text: &str) -> bool {
        PLANTUML_DIRECTIVE_RE.is_match(text)
    }

    /// Participant declarations, participant-kind keywords at line start, and
    /// class declarations.
    fn weak_match(&self, text: &str) -> bool {
        declares_participant(text)
            || PLANTUML_PARTICIPANT_KIND_RE.is_match(text)
            || PLANTUML_CLASS_RE.is_match(text)
    }
}

/// Graphviz: a `[strict] digraph|graph [id]` header with `{` on the same
/// line or as the first text of a following line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizDetector;

impl FormatDetector for GraphvizDetector {
    fn kind(&self) -> GrammarKind {
        GrammarKind::Graphviz
    }

    fn strong_match(&self, text: &str) -> bool {
        GRAPHVIZ_HEADER_RE.is_match(text)
    }
}

/// Returns the detector for `kind`.
pub fn detector_for(kind: GrammarKind) -> &'static dyn FormatDetector {
    match kind {
        GrammarKind::Mermaid => &MermaidDetector,
        GrammarKind::PlantUml => &PlantUmlDetector,
        GrammarKind::Graphviz => &GraphvizDetector,
    }
}

/// Returns `true` if `text` looks like `kind`, ignoring other grammars.
pub fn is_format(text: &str, kind: GrammarKind) -> bool {
    detector_for(kind).is_format(text.trim_start_matches('\u{feff}'))
}

/// Determines the grammar of a diagram source.
///
/// Returns `None` for empty or whitespace-only text, or when no detector
/// matches; both are ordinary outcomes, not errors.
///
/// # Examples
///
/// ```
/// use vizdoc_core::grammar::GrammarKind;
/// use vizdoc_parser::detect;
///
/// assert_eq!(detect("graph TD\nA-->B"), Some(GrammarKind::Mermaid));
/// assert_eq!(detect("digraph G { A -> B }"), Some(GrammarKind::Graphviz));
/// assert_eq!(detect("just some prose"), None);
/// ```
pub fn detect(text: &str) -> Option<GrammarKind> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return None;
    }

    let detectors = DETECTION_ORDER.map(detector_for);
    let (kind, strength) = if let Some(d) = detectors.iter().find(|d| d.strong_match(text)) {
        (d.kind(), "strong")
    } else if let Some(d) = detectors.iter().find(|d| d.weak_match(text)) {
        (d.kind(), "weak")
    } else {
        debug!("No grammar detected");
        return None;
    };

    debug!(grammar = kind.name(), strength; "Grammar detected");
    Some(kind)
}
