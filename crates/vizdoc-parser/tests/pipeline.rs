use vizdoc_core::grammar::GrammarKind;
use vizdoc_parser::{DEFAULT_FENCE_TAGS, Translation, detect, extract_blocks, normalize, translate};

#[test]
fn test_mixed_markdown_document() {
    let input = r#"# Architecture

The request flow:

```plantuml
@startuml
participant Alice
participant Bob
Alice -> Bob: Hi
@enduml
```

And the module graph:

```dot
digraph deps { core -> parser; parser -> cli; }
```

```
flowchart LR
  A[class Foo] --> B
```
"#;

    let blocks = extract_blocks(input, DEFAULT_FENCE_TAGS);
    assert_eq!(blocks.len(), 3);

    let kinds: Vec<_> = blocks.iter().map(|b| detect(b.text())).collect();
    assert_eq!(
        kinds,
        [
            Some(GrammarKind::PlantUml),
            Some(GrammarKind::Graphviz),
            Some(GrammarKind::Mermaid)
        ]
    );

    let source = normalize(blocks[0].text(), GrammarKind::PlantUml);
    let Translation::Graph(graph) = translate(&source) else {
        panic!("Expected a translated graph");
    };
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.to_string().contains(r#"label="Hi""#));
}

#[test]
fn test_class_word_in_flowchart_label_stays_mermaid() {
    let text = "graph TD\n  A[class diagram] --> B\n  class A highlighted";
    assert_eq!(detect(text), Some(GrammarKind::Mermaid));
}

#[test]
fn test_bare_plantuml_is_framed_then_translated() {
    let text = "actor User\nUser -> System : login";
    assert_eq!(detect(text), Some(GrammarKind::PlantUml));

    let source = normalize(text, GrammarKind::PlantUml);
    assert!(source.text().starts_with("@startuml\n"));
    assert!(source.text().ends_with("\n@enduml"));
    assert!(matches!(translate(&source), Translation::Graph(_)));
}

#[test]
fn test_mindmap_block_is_unsupported() {
    let input = "```puml\n@startmindmap\n* Root\n** Leaf\n@endmindmap\n```";
    let blocks = extract_blocks(input, DEFAULT_FENCE_TAGS);
    assert_eq!(blocks.len(), 1);

    let kind = detect(blocks[0].text()).expect("Expected a grammar");
    assert_eq!(kind, GrammarKind::PlantUml);

    match translate(&normalize(blocks[0].text(), kind)) {
        Translation::Unsupported(construct) => assert_eq!(construct.id(), "mindmap"),
        other => panic!("Expected unsupported construct, got {other:?}"),
    }
}

#[test]
fn test_graphviz_passes_through_unchanged() {
    let text = "\u{feff}digraph G { A -> B }\n";
    let kind = detect(text).expect("Expected a grammar");
    assert_eq!(kind, GrammarKind::Graphviz);
    assert!(!kind.needs_translation());
    assert_eq!(normalize(text, kind).text(), "digraph G { A -> B }");
}

#[test]
fn test_fenced_example_inside_fenced_example() {
    let input = "How to embed a diagram:\n\n````\n```mermaid\ngraph TD\nA-->B\n```\n````\n";
    let blocks = extract_blocks(input, DEFAULT_FENCE_TAGS);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].tag(), Some("mermaid"));
    assert_eq!(blocks[0].text(), "graph TD\nA-->B");
    assert_eq!(detect(blocks[0].text()), Some(GrammarKind::Mermaid));

    let quoted = "````markdown\n```plantuml\nAlice -[#red]> Bob : hi\n```\n````";
    let blocks = extract_blocks(quoted, DEFAULT_FENCE_TAGS);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), "Alice -[#red]> Bob : hi");
}

#[test]
fn test_graphviz_with_brace_on_next_line() {
    let text = "graph\n{\n  a -- b\n}";
    assert_eq!(detect(text), Some(GrammarKind::Graphviz));
    assert_eq!(detect("digraph deps\n{\n  a -> b\n}"), Some(GrammarKind::Graphviz));
}

#[test]
fn test_colored_plantuml_arrows_translate_to_edges() {
    let text = "@startuml\nAlice -[#blue]> Bob : hi\nBob -> Alice ++ : ack\n@enduml";
    let kind = detect(text).expect("Expected a grammar");
    assert_eq!(kind, GrammarKind::PlantUml);

    let Translation::Graph(graph) = translate(&normalize(text, kind)) else {
        panic!("Expected a translated graph");
    };
    assert_eq!(graph.edge_count(), 2);
}
