//! DOT graph building on top of `dot-structures`.
//!
//! Only what the PlantUML translation needs: one directed graph with
//! graph-level settings, default node attributes, nodes, and edges. Every
//! node identifier is stored as an escaped quoted id, so user-supplied names
//! never escape their statement. Printing goes through the `graphviz-rust`
//! printer.

use std::fmt;

use dot_generator::id;
use dot_structures::{
    Attribute, Edge, EdgeTy, Graph, GraphAttributes, Id, Node, NodeId, Stmt, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

/// An attribute value and how it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A DOT keyword such as `box` or `dashed`, written verbatim.
    Keyword(&'static str),
    /// Free text, written as an escaped quoted string.
    Text(String),
    /// A record-shape label: free text whose record metacharacters
    /// (`{ } | < >`) are escaped as well.
    Record(String),
}

/// A `key=value` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    key: &'static str,
    value: AttrValue,
}

impl Attr {
    pub fn keyword(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: AttrValue::Keyword(value),
        }
    }

    pub fn text(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: AttrValue::Text(value.into()),
        }
    }

    pub fn record(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: AttrValue::Record(value.into()),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    fn to_attribute(&self) -> Attribute {
        let value = match &self.value {
            AttrValue::Keyword(value) => id!(value),
            AttrValue::Text(value) => quoted_id(value, ""),
            AttrValue::Record(value) => quoted_id(value, "{}|<>"),
        };
        Attribute(id!(self.key), value)
    }
}

/// Escapes `text` for a DOT quoted string.
///
/// Backslashes and double quotes are prefixed with a backslash, line breaks
/// become `\n`, and carriage returns are dropped. Characters in `extra` are
/// backslash-escaped too.
fn escape(text: &str, extra: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c if extra.contains(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

fn quoted_id(text: &str, extra: &str) -> Id {
    let escaped = escape(text, extra);
    id!(esc escaped)
}

fn node_id(id: &str) -> NodeId {
    NodeId(quoted_id(id, ""), None)
}

fn attributes(attrs: &[Attr]) -> Vec<Attribute> {
    attrs.iter().map(Attr::to_attribute).collect()
}

/// A directed graph ready to be written as DOT source.
///
/// # Examples
///
/// ```
/// use vizdoc_parser::dot::{Attr, DotGraph};
///
/// let mut graph = DotGraph::new("G");
/// graph.add_node("a", vec![]);
/// graph.add_edge("a", "b", vec![Attr::text("label", "go")]);
///
/// let dot = graph.to_string();
/// assert!(dot.starts_with("digraph G {"));
/// assert!(dot.contains(r#""a" -> "b""#));
/// assert!(dot.contains(r#"label="go""#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DotGraph {
    name: String,
    graph: Graph,
    node_count: usize,
    edge_count: usize,
}

impl DotGraph {
    /// Creates an empty graph. `name` must be a plain DOT identifier.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            graph: Graph::DiGraph {
                id: id!(name),
                strict: false,
                stmts: Vec::new(),
            },
            name,
            node_count: 0,
            edge_count: 0,
        }
    }

    /// Adds a graph-level setting such as `rankdir=LR`.
    pub fn with_setting(mut self, attr: Attr) -> Self {
        self.push(Stmt::Attribute(attr.to_attribute()));
        self
    }

    /// Sets the default attributes of every node.
    pub fn with_node_defaults(mut self, attrs: Vec<Attr>) -> Self {
        self.push(Stmt::GAttribute(GraphAttributes::Node(attributes(&attrs))));
        self
    }

    /// Adds a node statement. Duplicate ids are kept as separate statements.
    pub fn add_node(&mut self, id: impl AsRef<str>, attrs: Vec<Attr>) {
        self.push(Stmt::Node(Node {
            id: node_id(id.as_ref()),
            attributes: attributes(&attrs),
        }));
        self.node_count += 1;
    }

    /// Adds an edge statement from `from` to `to`.
    pub fn add_edge(&mut self, from: impl AsRef<str>, to: impl AsRef<str>, attrs: Vec<Attr>) {
        self.push(Stmt::Edge(Edge {
            ty: EdgeTy::Pair(
                Vertex::N(node_id(from.as_ref())),
                Vertex::N(node_id(to.as_ref())),
            ),
            attributes: attributes(&attrs),
        }));
        self.edge_count += 1;
    }

    fn push(&mut self, stmt: Stmt) {
        match &mut self.graph {
            Graph::Graph { stmts, .. } | Graph::DiGraph { stmts, .. } => stmts.push(stmt),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has neither nodes nor edges.
    pub fn is_empty(&self) -> bool {
        self.node_count == 0 && self.edge_count == 0
    }

    /// The underlying `dot-structures` graph.
    pub fn as_graph(&self) -> &Graph {
        &self.graph
    }
}

impl fmt::Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ctx = PrinterContext::default();
        ctx.with_semi();
        f.write_str(&self.graph.print(&mut ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmts(graph: &DotGraph) -> &[Stmt] {
        match graph.as_graph() {
            Graph::DiGraph { stmts, .. } | Graph::Graph { stmts, .. } => stmts,
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = DotGraph::new("empty");
        assert!(graph.is_empty());
        assert!(stmts(&graph).is_empty());
        assert!(graph.to_string().starts_with("digraph empty {"));
    }

    #[test]
    fn test_settings_and_defaults_precede_statements() {
        let mut graph = DotGraph::new("sequence")
            .with_setting(Attr::keyword("rankdir", "LR"))
            .with_node_defaults(vec![
                Attr::keyword("shape", "box"),
                Attr::keyword("style", "filled"),
                Attr::keyword("fillcolor", "white"),
            ]);
        graph.add_node("Alice", vec![]);
        graph.add_edge("Alice", "Bob", vec![]);

        let stmts = stmts(&graph);
        assert!(matches!(stmts[0], Stmt::Attribute(_)));
        assert!(matches!(stmts[1], Stmt::GAttribute(GraphAttributes::Node(_))));
        assert!(matches!(stmts[2], Stmt::Node(_)));
        assert!(matches!(stmts[3], Stmt::Edge(_)));

        let dot = graph.to_string();
        assert!(dot.contains("rankdir=LR"));
        assert!(dot.contains("shape=box"));
        assert!(dot.contains("fillcolor=white"));
        assert!(dot.find("rankdir=LR") < dot.find(r#""Alice" -> "Bob""#));
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_identifiers_and_labels_are_escaped() {
        let mut graph = DotGraph::new("G");
        graph.add_node(r#"say "hi""#, vec![Attr::text("label", "two\nlines")]);
        graph.add_edge(r"a\b", "c", vec![]);

        let dot = graph.to_string();
        assert!(dot.contains(r#""say \"hi\"""#));
        assert!(dot.contains(r#"label="two\nlines""#));
        assert!(dot.contains(r#""a\\b" -> "c""#));
    }

    #[test]
    fn test_record_labels_escape_metacharacters() {
        let attribute = Attr::record("label", "Map<K, V> | {x}").to_attribute();
        assert_eq!(
            attribute,
            Attribute(
                Id::Plain("label".to_string()),
                Id::Escaped(r#""Map\<K, V\> \| \{x\}""#.to_string())
            )
        );
    }

    #[test]
    fn test_text_labels_keep_record_metacharacters() {
        let attribute = Attr::text("label", "a|b").to_attribute();
        assert_eq!(attribute.1, Id::Escaped(r#""a|b""#.to_string()));
    }

    #[test]
    fn test_keywords_are_plain_ids() {
        let attribute = Attr::keyword("arrowhead", "empty").to_attribute();
        assert_eq!(attribute.1, Id::Plain("empty".to_string()));
    }

    #[test]
    fn test_duplicate_nodes_are_kept() {
        let mut graph = DotGraph::new("G");
        graph.add_node("A", vec![]);
        graph.add_node("A", vec![]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(stmts(&graph).len(), 2);
        assert_eq!(graph.to_string().matches(r#""A""#).count(), 2);
    }
}
