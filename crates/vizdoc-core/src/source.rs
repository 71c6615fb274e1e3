//! Diagram source text as it flows through the pipeline.

use std::ops::Range;

use crate::grammar::GrammarHint;

/// Raw diagram text plus the grammar the caller declared for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagramSource<'a> {
    text: &'a str,
    hint: GrammarHint,
}

impl<'a> DiagramSource<'a> {
    /// Creates a source whose grammar is left to detection.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            hint: GrammarHint::Auto,
        }
    }

    /// Returns a copy of this source with the given grammar hint.
    pub fn with_hint(self, hint: GrammarHint) -> Self {
        Self { hint, ..self }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn hint(&self) -> GrammarHint {
        self.hint
    }
}

/// One candidate diagram found in the input.
///
/// The text is a trimmed slice of the original input, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock<'a> {
    text: &'a str,
    tag: Option<&'a str>,
    span: Range<usize>,
}

impl<'a> ExtractedBlock<'a> {
    /// Creates a block.
    ///
    /// # Arguments
    ///
    /// * `text` - Block body, already trimmed
    /// * `tag` - Fence tag that opened the block, or `None` for untagged fences
    ///   and whole-input blocks
    /// * `span` - Byte range of `text` within the original input
    pub fn new(text: &'a str, tag: Option<&'a str>, span: Range<usize>) -> Self {
        Self { text, tag, span }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.tag
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns `true` if the two blocks share at least one byte of input.
    pub fn overlaps(&self, other: &ExtractedBlock<'_>) -> bool {
        self.span.start < other.span.end && other.span.start < self.span.end
    }

    /// Converts the block into a source carrying the given hint.
    pub fn to_source(&self, hint: GrammarHint) -> DiagramSource<'a> {
        DiagramSource::new(self.text).with_hint(hint)
    }
}
