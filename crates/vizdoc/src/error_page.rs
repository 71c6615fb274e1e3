//! Documents for the recoverable failure classes.
//!
//! Each page is a complete HTML document carrying the error status marker,
//! a description of what went wrong, and the original diagram text. The page
//! template is compiled into the crate so an error page can always be
//! produced, even when no runtime asset or template can be loaded.

use vizdoc_core::document::{RenderDocument, RenderStatus};
use vizdoc_parser::UnsupportedConstruct;

use crate::assemble::{
    escape::html_text,
    template::{Bindings, substitute},
};

const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

const SUPPORTED_GRAMMARS: &str = "\
            <h3>Supported diagram types:</h3>
            <ul>
                <li><strong>Mermaid:</strong> flowchart, graph, sequenceDiagram, classDiagram, stateDiagram, erDiagram, gantt, pie, journey, gitGraph, requirementDiagram, mindmap, timeline</li>
                <li><strong>PlantUML:</strong> @startuml ... @enduml blocks (sequence and class diagrams)</li>
                <li><strong>Graphviz:</strong> digraph, graph, strict digraph, strict graph</li>
            </ul>
            <p>Check that the diagram starts with the right keyword (e.g. <code>flowchart TD</code>, <code>sequenceDiagram</code>, <code>@startuml</code>).</p>";

struct ErrorPage<'a> {
    status: RenderStatus,
    icon: &'a str,
    heading: &'a str,
    summary: &'a str,
    details: &'a str,
}

impl ErrorPage<'_> {
    fn render(&self, original: &str) -> RenderDocument {
        let marker = self.status.marker();
        let original = html_text(original);
        let bindings = Bindings::new()
            .bind("STATUS_MARKER", &marker)
            .bind("ICON", self.icon)
            .bind("HEADING", self.heading)
            .bind("SUMMARY", self.summary)
            .bind("DETAILS", self.details)
            .bind("ORIGINAL", &original);

        RenderDocument::new(self.status, substitute(ERROR_TEMPLATE, &bindings))
    }
}

/// No detector matched the block.
pub fn no_type_detected(original: &str) -> RenderDocument {
    ErrorPage {
        status: RenderStatus::NoTypeDetected,
        icon: "🤔",
        heading: "No Diagram Type Detected",
        summary: "The provided text doesn't appear to be a recognized diagram format.",
        details: SUPPORTED_GRAMMARS,
    }
    .render(original)
}

/// A runtime asset or template named `name` could not be found.
pub fn missing_asset(name: &str, original: &str) -> RenderDocument {
    let details = format!(
        "            <h3>Missing asset:</h3>\n            <p><code>{}</code></p>\n            <p>Place the file in the configured asset directory. All scripts are embedded from local files; nothing is fetched from a CDN.</p>",
        html_text(name)
    );
    ErrorPage {
        status: RenderStatus::MissingAsset,
        icon: "📦",
        heading: "Missing Runtime Asset",
        summary: "A file needed to render this diagram is not available.",
        details: &details,
    }
    .render(original)
}

/// The source uses a construct the local engines cannot render.
pub fn unsupported_construct(construct: &UnsupportedConstruct, original: &str) -> RenderDocument {
    let details = format!(
        "            <h3>Missing capability:</h3>\n            <p><code>{}</code>: {}.</p>\n            <p>Required: Full PlantUML engine support</p>",
        construct.diagram_type(),
        html_text(&construct.to_string())
    );
    ErrorPage {
        status: RenderStatus::UnsupportedConstruct,
        icon: "⚠️",
        heading: "Unsupported Diagram Type",
        summary: "This diagram uses features the bundled renderers cannot draw.",
        details: &details,
    }
    .render(original)
}

/// Assembly failed with `message`.
pub fn assembly_exception(message: &str, original: &str) -> RenderDocument {
    let details = format!(
        "            <h3>Error:</h3>\n            <p>{}</p>",
        html_text(message)
    );
    ErrorPage {
        status: RenderStatus::AssemblyException,
        icon: "❌",
        heading: "Rendering Error",
        summary: "The document for this diagram could not be assembled.",
        details: &details,
    }
    .render(original)
}

#[cfg(test)]
mod tests {
    use vizdoc_core::grammar::GrammarKind;
    use vizdoc_parser::{Translation, normalize, translate};

    use super::*;

    fn assert_error_page(document: &RenderDocument, status: RenderStatus) {
        assert_eq!(document.status(), status);
        assert_eq!(RenderStatus::sniff(document.html()), Some(status));
        assert!(document.html().contains(r#"<meta charset="utf-8">"#));
        assert!(!document.html().contains("§"));
    }

    #[test]
    fn test_no_type_detected_echoes_source() {
        let document = no_type_detected("hello <world> & A -> B");
        assert_error_page(&document, RenderStatus::NoTypeDetected);
        assert!(document.html().contains("hello &lt;world> &amp; A -> B"));
        assert!(document.html().contains("Supported diagram types"));
    }

    #[test]
    fn test_missing_asset_names_asset() {
        let document = missing_asset("mermaid.min.js", "graph TD\nA-->B");
        assert_error_page(&document, RenderStatus::MissingAsset);
        assert!(document.html().contains("<code>mermaid.min.js</code>"));
        assert!(document.html().contains("A-->B"));
    }

    #[test]
    fn test_unsupported_construct_lists_capability() {
        let source = "@startmindmap\n* Root\n@endmindmap";
        let Translation::Unsupported(construct) =
            translate(&normalize(source, GrammarKind::PlantUml))
        else {
            panic!("expected unsupported construct");
        };

        let document = unsupported_construct(&construct, source);
        assert_error_page(&document, RenderStatus::UnsupportedConstruct);
        assert!(document.html().contains("plantuml-mindmap"));
        assert!(document.html().contains("Mind maps are not supported"));
        assert!(document.html().contains("@startmindmap\n* Root\n@endmindmap"));
    }

    #[test]
    fn test_assembly_exception_escapes_message() {
        let document = assembly_exception("bad <template>", "digraph { a -> b }");
        assert_error_page(&document, RenderStatus::AssemblyException);
        assert!(document.html().contains("bad &lt;template>"));
    }

    #[test]
    fn test_placeholder_text_in_source_is_not_expanded() {
        let document = no_type_detected("§HEADING§");
        assert!(document.html().contains("<div class=\"code-block\">§HEADING§</div>"));
    }
}
