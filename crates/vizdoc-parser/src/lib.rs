//! Text-level processing for vizdoc.
//!
//! This crate turns raw input into diagram sources ready to embed:
//!
//! 1. [`extract_blocks`] splits markdown into fenced diagram blocks.
//! 2. [`detect`] determines each block's grammar.
//! 3. [`normalize`] brings a block into the canonical form of its grammar.
//! 4. [`translate`] rewrites PlantUML into DOT for the Viz.js engine.
//!
//! None of these steps fail: undetectable text yields `None`, and
//! untranslatable PlantUML yields a [`Translation`] describing why.
//!
//! # Example
//!
//! ```
//! use vizdoc_core::grammar::GrammarKind;
//! use vizdoc_parser::{DEFAULT_FENCE_TAGS, detect, extract_blocks, normalize};
//!
//! let input = "```\ndigraph G { A -> B }\n```";
//! let blocks = extract_blocks(input, DEFAULT_FENCE_TAGS);
//! let kind = detect(blocks[0].text()).unwrap();
//! assert_eq!(kind, GrammarKind::Graphviz);
//! assert_eq!(normalize(blocks[0].text(), kind).text(), "digraph G { A -> B }");
//! ```

pub mod detect;
pub mod dot;
mod extract;
mod normalize;
mod translate;

pub use detect::{FormatDetector, detect, detector_for, is_format};
pub use extract::{DEFAULT_FENCE_TAGS, extract_blocks};
pub use normalize::{NormalizedSource, normalize};
pub use translate::{Translation, UnsupportedConstruct, placeholder_graph, translate};
