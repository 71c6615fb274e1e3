//! PlantUML to DOT translation.
//!
//! The embedded Viz.js engine only understands DOT, so PlantUML sources are
//! rewritten into a DOT graph before embedding. Two shapes are translated:
//!
//! - **Sequence**: participants become nodes, messages become labeled edges.
//! - **Class**: class-like declarations become record nodes, inheritance
//!   arrows become hollow-headed edges.
//!
//! Everything else is classified against a table of shapes the local engine
//! is known not to handle, yielding [`Translation::Unsupported`]. A source
//! that matches none of them gets a fixed placeholder graph.

mod statement;

use std::fmt;

use log::debug;

use crate::{
    dot::{Attr, DotGraph},
    normalize::NormalizedSource,
};

use statement::{ClassKind, Statement, parse_line};

/// A PlantUML diagram shape the local engine cannot render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedConstruct {
    id: &'static str,
    description: &'static str,
}

impl UnsupportedConstruct {
    const fn new(id: &'static str, description: &'static str) -> Self {
        Self { id, description }
    }

    /// Short machine name, e.g. `mindmap`.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Plural human-readable name, e.g. `Mind maps`.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Diagram type reported to the user, e.g. `plantuml-mindmap`.
    pub fn diagram_type(&self) -> String {
        format!("plantuml-{}", self.id)
    }
}

impl fmt::Display for UnsupportedConstruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} are not supported by the Viz.js-based PlantUML renderer",
            self.description
        )
    }
}

/// Result of translating a PlantUML source.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// A translated sequence or class diagram.
    Graph(DotGraph),
    /// A shape known to be unrenderable locally.
    Unsupported(UnsupportedConstruct),
    /// The generic stand-in graph for unrecognized sources.
    Placeholder(DotGraph),
}

impl Translation {
    /// Returns the graph to render, if any.
    pub fn graph(&self) -> Option<&DotGraph> {
        match self {
            Self::Graph(graph) | Self::Placeholder(graph) => Some(graph),
            Self::Unsupported(_) => None,
        }
    }
}

/// A line predicate over a trimmed, lowercased body line.
type LinePredicate = fn(&str) -> bool;

/// Known unrenderable shapes, first match wins.
const UNSUPPORTED_SHAPES: [(UnsupportedConstruct, LinePredicate); 7] = [
    (
        UnsupportedConstruct::new("mindmap", "Mind maps"),
        |line| line.starts_with("@startmindmap"),
    ),
    (
        UnsupportedConstruct::new("salt", "Salt UI mockups"),
        |line| line.starts_with("@startsalt"),
    ),
    (
        UnsupportedConstruct::new("gantt", "Gantt charts"),
        |line| line.starts_with("@startgantt"),
    ),
    (
        UnsupportedConstruct::new("activity", "Activity diagrams"),
        |line| line == "start",
    ),
    (
        UnsupportedConstruct::new("activity", "Activity diagrams with complex control flow"),
        |line| line.len() > 2 && line.starts_with(':') && line.ends_with(';'),
    ),
    (
        UnsupportedConstruct::new("object", "Object diagrams"),
        |line| line.starts_with("object "),
    ),
    (
        UnsupportedConstruct::new("timing", "Timing diagrams"),
        |line| line.starts_with("robust ") || line.starts_with("concise "),
    ),
];

/// Catch-all for sources no table entry claims. Rendered as the placeholder.
const UNKNOWN_SHAPE: UnsupportedConstruct =
    UnsupportedConstruct::new("unknown", "Advanced PlantUML features");

/// Matches the source against [`UNSUPPORTED_SHAPES`], falling through to
/// [`UNKNOWN_SHAPE`].
fn classify(text: &str) -> UnsupportedConstruct {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .collect();

    UNSUPPORTED_SHAPES
        .iter()
        .find(|(_, matches)| lines.iter().any(|line| matches(line)))
        .map_or(UNKNOWN_SHAPE, |(construct, _)| *construct)
}

fn sequence_graph(statements: &[Statement<'_>]) -> DotGraph {
    let mut graph = DotGraph::new("sequence")
        .with_setting(Attr::keyword("rankdir", "LR"))
        .with_node_defaults(vec![
            Attr::keyword("shape", "box"),
            Attr::keyword("style", "filled"),
            Attr::keyword("fillcolor", "white"),
        ]);

    for statement in statements {
        match *statement {
            Statement::Participant { id, label } if id == label => graph.add_node(id, vec![]),
            Statement::Participant { id, label } => {
                graph.add_node(id, vec![Attr::text("label", label)]);
            }
            Statement::Message {
                from,
                to,
                label,
                bidirectional,
            } => {
                let mut attrs: Vec<Attr> = label
                    .map(|label| vec![Attr::text("label", label)])
                    .unwrap_or_default();
                if bidirectional {
                    attrs.push(Attr::keyword("dir", "both"));
                }
                graph.add_edge(from, to, attrs);
            }
            _ => {}
        }
    }
    graph
}

fn class_graph(statements: &[Statement<'_>]) -> DotGraph {
    let mut graph = DotGraph::new("classes").with_node_defaults(vec![
        Attr::keyword("shape", "record"),
        Attr::keyword("style", "filled"),
        Attr::keyword("fillcolor", "white"),
    ]);

    for statement in statements {
        match *statement {
            Statement::Class { kind, name } => {
                let label = match kind {
                    ClassKind::Class => name.to_string(),
                    ClassKind::Abstract => format!("«abstract»\n{name}"),
                    ClassKind::Interface => format!("«interface»\n{name}"),
                    ClassKind::Enum => format!("«enum»\n{name}"),
                };
                graph.add_node(name, vec![Attr::record("label", label)]);
            }
            Statement::Inheritance {
                parent,
                child,
                dashed,
            } => {
                let mut attrs = vec![Attr::keyword("arrowhead", "empty")];
                if dashed {
                    attrs.push(Attr::keyword("style", "dashed"));
                }
                graph.add_edge(parent, child, attrs);
            }
            _ => {}
        }
    }
    graph
}

/// The fixed stand-in graph for PlantUML sources of unknown shape.
pub fn placeholder_graph() -> DotGraph {
    let mut graph = DotGraph::new("G").with_node_defaults(vec![
        Attr::keyword("shape", "box"),
        Attr::keyword("style", "filled"),
        Attr::keyword("fillcolor", "lightyellow"),
    ]);
    graph.add_node(
        "PlantUML",
        vec![Attr::text("label", "PlantUML Diagram\n(Local Rendering)")],
    );
    graph.add_node(
        "Note",
        vec![
            Attr::text(
                "label",
                "This PlantUML diagram type\nis not fully supported\nfor local rendering",
            ),
            Attr::keyword("shape", "note"),
            Attr::keyword("fillcolor", "lightblue"),
        ],
    );
    graph.add_edge("PlantUML", "Note", vec![Attr::keyword("style", "dashed")]);
    graph
}

/// Translates a normalized PlantUML source.
///
/// Sources with any participant declaration or message arrow translate as
/// sequence diagrams; otherwise sources with any class declaration translate
/// as class diagrams. A source of neither shape, a sequence without a single
/// message edge, or a class translation that came out empty, is classified
/// instead. The result is total: every source maps
/// to exactly one [`Translation`].
///
/// # Examples
///
/// ```
/// use vizdoc_core::grammar::GrammarKind;
/// use vizdoc_parser::{Translation, normalize, translate};
///
/// let source = normalize("Alice -> Bob: Hi", GrammarKind::PlantUml);
/// let Translation::Graph(graph) = translate(&source) else {
///     panic!("expected a graph");
/// };
/// let dot = graph.to_string();
/// assert!(dot.contains(r#""Alice" -> "Bob""#));
/// assert!(dot.contains(r#"label="Hi""#));
/// ```
pub fn translate(source: &NormalizedSource) -> Translation {
    let statements: Vec<Statement<'_>> = source.text().lines().map(parse_line).collect();

    let sequence = statements.iter().any(Statement::is_sequence);
    let graph = if sequence {
        Some(sequence_graph(&statements))
    } else if statements.iter().any(Statement::is_class) {
        Some(class_graph(&statements))
    } else {
        None
    };

    match graph {
        Some(graph) if sequence && graph.edge_count() == 0 => {
            debug!(nodes = graph.node_count(); "Sequence translation has no messages, classifying");
        }
        Some(graph) if !graph.is_empty() => {
            debug!(
                shape = graph.name(),
                nodes = graph.node_count(),
                edges = graph.edge_count();
                "Translated PlantUML to DOT"
            );
            return Translation::Graph(graph);
        }
        Some(graph) => debug!(shape = graph.name(); "Translation came out empty, classifying"),
        None => {}
    }

    let construct = classify(source.text());
    if construct == UNKNOWN_SHAPE {
        debug!("Unrecognized PlantUML shape, using placeholder graph");
        Translation::Placeholder(placeholder_graph())
    } else {
        debug!(construct = construct.id(); "Unsupported PlantUML shape");
        Translation::Unsupported(construct)
    }
}
