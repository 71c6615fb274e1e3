//! Diagram grammar kinds and the browser engines that render them.
//!
//! # Overview
//!
//! - [`GrammarKind`]: the three textual diagram languages vizdoc recognizes.
//! - [`GrammarHint`]: a caller-declared grammar, or `auto` for detection.
//! - [`Engine`]: the embedded browser engine used for a grammar.
//! - [`DETECTION_ORDER`]: the fixed precedence in which detectors are tried.
//!
//! PlantUML has no browser engine of its own. Its sources are translated to
//! DOT and rendered with the Graphviz engine, which is why
//! [`GrammarKind::engine`] maps both [`GrammarKind::PlantUml`] and
//! [`GrammarKind::Graphviz`] to [`Engine::Viz`].

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::asset;

/// A textual diagram language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarKind {
    /// Mermaid: flowcharts, sequence diagrams and the rest of the Mermaid family.
    Mermaid,
    /// PlantUML: `@startuml` style UML sources.
    PlantUml,
    /// Graphviz DOT: `digraph`/`graph` sources.
    Graphviz,
}

/// The order in which format detectors are consulted.
///
/// Tokens shared between grammars (the word `class`, `participant` lines)
/// resolve in favor of the earlier entry. Detection, and nothing else, reads
/// this list; reordering it changes which grammar wins an ambiguous source.
pub const DETECTION_ORDER: [GrammarKind; 3] = [
    GrammarKind::Mermaid,
    GrammarKind::PlantUml,
    GrammarKind::Graphviz,
];

impl GrammarKind {
    /// Returns the lowercase machine name (`mermaid`, `plantuml`, `graphviz`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::PlantUml => "plantuml",
            Self::Graphviz => "graphviz",
        }
    }

    /// Returns the human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mermaid => "Mermaid",
            Self::PlantUml => "PlantUML",
            Self::Graphviz => "Graphviz",
        }
    }

    /// File extension used when the embedded controls download the source.
    pub fn source_extension(self) -> &'static str {
        match self {
            Self::Mermaid => "mmd",
            Self::PlantUml => "puml",
            Self::Graphviz => "dot",
        }
    }

    /// Returns the browser engine that renders this grammar.
    pub fn engine(self) -> Engine {
        match self {
            Self::Mermaid => Engine::Mermaid,
            Self::PlantUml | Self::Graphviz => Engine::Viz,
        }
    }

    /// Returns `true` if sources of this grammar are translated before rendering.
    pub fn needs_translation(self) -> bool {
        matches!(self, Self::PlantUml)
    }
}

impl fmt::Display for GrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrammarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mermaid" => Ok(Self::Mermaid),
            "plantuml" | "uml" | "puml" => Ok(Self::PlantUml),
            "graphviz" | "dot" => Ok(Self::Graphviz),
            _ => Err(format!(
                "invalid grammar `{s}`, valid values: mermaid, plantuml, graphviz"
            )),
        }
    }
}

/// The grammar a caller declares for a source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum GrammarHint {
    /// Let the detector cascade decide.
    #[default]
    Auto,
    /// Skip detection and treat the source as this grammar.
    Explicit(GrammarKind),
}

impl FromStr for GrammarHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<GrammarKind>()
            .map(Self::Explicit)
            .map_err(|_| format!("invalid grammar `{s}`, valid values: auto, mermaid, plantuml, graphviz"))
    }
}

impl TryFrom<String> for GrammarHint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A browser-side rendering engine embedded into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// Mermaid.js.
    Mermaid,
    /// Viz.js, the Graphviz port.
    Viz,
}

impl Engine {
    /// Runtime assets holding the engine source, in embedding order.
    pub fn assets(self) -> &'static [&'static str] {
        match self {
            Self::Mermaid => &[asset::MERMAID_JS],
            Self::Viz => &[asset::VIZ_LITE_JS, asset::VIZ_FULL_JS],
        }
    }

    /// Name of the template fragment that replaces the default render stub.
    pub fn fragment(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid.js",
            Self::Viz => "viz.js",
        }
    }
}
