//! Markdown fenced-block extraction.
//!
//! Input may be a bare diagram, or markdown holding one or more fenced
//! diagrams of mixed grammars. [`extract_blocks`] turns it into the list of
//! candidate blocks the rest of the pipeline renders one by one.

use std::ops::Range;

use log::debug;

use vizdoc_core::source::ExtractedBlock;

/// Fence tags recognized by default.
pub const DEFAULT_FENCE_TAGS: &[&str] = &["mermaid", "plantuml", "uml", "puml", "dot", "graphviz"];

/// A closed fenced region: the opening tag and the byte range of its body.
#[derive(Debug)]
struct Fence<'a> {
    tag: Option<&'a str>,
    body: Range<usize>,
}

/// Splits a fence line into its backtick count and the info string after it.
fn fence_marker(line: &str) -> Option<(usize, &str)> {
    let ticks = line.bytes().take_while(|&b| b == b'`').count();
    (ticks >= 3).then(|| (ticks, &line[ticks..]))
}

/// Finds closed fenced regions in document order.
///
/// A region opens on a line starting with three or more backticks whose tag
/// (the first word of the info string, if any) is accepted by `opens`, and
/// closes on the next line holding only at least as many backticks. Fence
/// lines `opens` rejects are treated as ordinary lines, so a fence nested in
/// a rejected outer fence is still found. An unterminated fence yields
/// nothing.
fn scan_fences<'a>(text: &'a str, opens: impl Fn(Option<&str>) -> bool) -> Vec<Fence<'a>> {
    let mut fences = Vec::new();
    let mut open: Option<(usize, Option<&str>, usize)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let content = line.trim_end_matches(['\n', '\r']).trim_start();

        let Some((ticks, info)) = fence_marker(content) else {
            continue;
        };

        match open {
            None => {
                let tag = info.split_whitespace().next();
                if opens(tag) {
                    open = Some((ticks, tag, offset));
                }
            }
            Some((open_ticks, tag, body_start)) => {
                if ticks >= open_ticks && info.trim().is_empty() {
                    fences.push(Fence {
                        tag,
                        body: body_start..line_start,
                    });
                    open = None;
                }
            }
        }
    }

    fences
}

/// Fences tagged with any of `known_tags`, one scan per tag.
///
/// A fence matching several list entries is reported once.
fn tagged_fences<'a, S: AsRef<str>>(text: &'a str, known_tags: &[S]) -> Vec<Fence<'a>> {
    let mut fences: Vec<Fence<'a>> = Vec::new();
    for known in known_tags {
        let known = known.as_ref();
        for fence in scan_fences(text, |tag| tag.is_some_and(|tag| tag.eq_ignore_ascii_case(known))) {
            if fences.iter().all(|seen| seen.body != fence.body) {
                fences.push(fence);
            }
        }
    }
    fences
}

/// Fences without an info string. Every fence takes part in the scan so a
/// tagged fence's closing line is never read as an opening one.
fn untagged_fences(text: &str) -> Vec<Fence<'_>> {
    scan_fences(text, |_| true)
        .into_iter()
        .filter(|fence| fence.tag.is_none())
        .collect()
}

/// Trims `text[range]` and wraps it as a block; `None` if nothing is left.
fn trimmed_block<'a>(
    text: &'a str,
    range: Range<usize>,
    tag: Option<&'a str>,
) -> Option<ExtractedBlock<'a>> {
    let slice = &text[range.clone()];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }

    let start = range.start + (slice.len() - slice.trim_start().len());
    Some(ExtractedBlock::new(trimmed, tag, start..start + trimmed.len()))
}

/// Extracts candidate diagram blocks from raw input.
///
/// Each of `known_tags` (compared case-insensitively) gets its own scan, so a
/// tagged fence nested inside another fence is still found. Untagged fences
/// are collected next; an untagged block whose text contains, or is
/// contained in, a tagged block's text, or whose span overlaps one, is
/// dropped. Fences with any other tag are ignored.
///
/// If the input holds no known-tag or untagged fence at all, the whole
/// trimmed input becomes the only block. Blocks are returned in document
/// order; blocks that are empty after trimming are dropped, so an empty
/// result means there is nothing to render.
///
/// # Examples
///
/// ```
/// use vizdoc_parser::extract_blocks;
///
/// let input = "Intro\n```mermaid\ngraph TD\nA-->B\n```\n";
/// let blocks = extract_blocks(input, &["mermaid"]);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].text(), "graph TD\nA-->B");
/// assert_eq!(blocks[0].tag(), Some("mermaid"));
/// ```
pub fn extract_blocks<'a, S: AsRef<str>>(text: &'a str, known_tags: &[S]) -> Vec<ExtractedBlock<'a>> {
    let tagged = tagged_fences(text, known_tags);
    let untagged = untagged_fences(text);
    let fenced_regions = tagged.len() + untagged.len();

    if fenced_regions == 0 {
        debug!("No fenced blocks found, using the whole input");
        return trimmed_block(text, 0..text.len(), None).into_iter().collect();
    }

    let mut blocks: Vec<ExtractedBlock<'a>> = tagged
        .into_iter()
        .filter_map(|fence| trimmed_block(text, fence.body, fence.tag))
        .collect();

    let tagged_count = blocks.len();
    for fence in untagged {
        let Some(block) = trimmed_block(text, fence.body, None) else {
            continue;
        };

        let duplicate = blocks[..tagged_count].iter().any(|tagged| {
            tagged.text().contains(block.text())
                || block.text().contains(tagged.text())
                || tagged.overlaps(&block)
        });
        if duplicate {
            debug!(span:? = block.span(); "Dropping untagged block duplicating a tagged block");
            continue;
        }
        blocks.push(block);
    }

    blocks.sort_by_key(|block| block.span().start);
    debug!(blocks = blocks.len(), fenced_regions; "Extracted diagram blocks");
    blocks
}
