//! Boundary preview: where a grammar's cascade would cut a file, and what
//! each piece classifies as.
//!
//! This is an inspection aid, not a splitter. Only the coarsest level that
//! occurs in the text is applied and chunk sizes are ignored.

use crate::handler::StructuralGrammar;
use crate::types::ChunkMetadata;
use serde::{Deserialize, Serialize};

/// One piece of a previewed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewChunk {
    /// Byte offset of the first byte (inclusive)
    pub start_byte: usize,

    /// Byte offset past the last byte (exclusive)
    pub end_byte: usize,

    /// First line with content (1-based)
    pub start_line: usize,

    /// Last line with content (1-based, inclusive)
    pub end_line: usize,

    /// Cascade level that produced the cut, `None` when nothing matched
    pub level: Option<usize>,

    pub content: String,

    pub metadata: ChunkMetadata,
}

/// Cut `text` at every match of the coarsest cascade level occurring in it.
///
/// The separator text begins the following chunk, so `"\n  web:"` style
/// boundaries leave the key at the head of its chunk.
pub fn preview_chunks<G>(grammar: &G, text: &str) -> Vec<PreviewChunk>
where
    G: StructuralGrammar + ?Sized,
{
    if text.is_empty() {
        return Vec::new();
    }

    let mut cuts = Vec::new();
    let mut level = None;
    for (index, candidate) in grammar.separator_cascade().levels().enumerate() {
        cuts = candidate
            .regex()
            .find_iter(text)
            .filter(|m| !m.is_empty() && m.start() > 0)
            .map(|m| m.start())
            .collect();
        if !cuts.is_empty() {
            level = Some(index);
            break;
        }
    }

    let mut bounds = Vec::with_capacity(cuts.len() + 2);
    bounds.push(0);
    bounds.extend(cuts);
    bounds.push(text.len());
    bounds.dedup();

    bounds
        .windows(2)
        .map(|span| {
            let (start, end) = (span[0], span[1]);
            let content = &text[start..end];
            let (start_line, end_line) = line_span(text, start, end);
            PreviewChunk {
                start_byte: start,
                end_byte: end,
                start_line,
                end_line,
                level,
                content: content.to_string(),
                metadata: grammar.extract_metadata(content),
            }
        })
        .collect()
}

/// 1-based line containing byte `offset`, clamped to the end of `text`
#[must_use]
pub fn byte_to_line(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    text.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Lines surrounding a chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContextLines<'a> {
    pub before: Vec<&'a str>,
    pub after: Vec<&'a str>,
}

/// Up to `context` lines before `start_line` and after `end_line` (1-based,
/// inclusive span)
#[must_use]
pub fn context_lines(
    text: &str,
    start_line: usize,
    end_line: usize,
    context: usize,
) -> ContextLines<'_> {
    let lines: Vec<&str> = text.lines().collect();
    let first = start_line.saturating_sub(1).min(lines.len());
    let last = end_line.max(start_line).min(lines.len());

    ContextLines {
        before: lines[first.saturating_sub(context)..first].to_vec(),
        after: lines[last..last.saturating_add(context).min(lines.len())].to_vec(),
    }
}

/// Lines of the first and last content byte, ignoring newlines at the edges
fn line_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let chunk = &text[start..end];
    let leading = chunk.len() - chunk.trim_start_matches(['\n', '\r']).len();
    let trailing = chunk.len() - chunk.trim_end_matches(['\n', '\r']).len();

    if leading == chunk.len() {
        let line = byte_to_line(text, start);
        return (line, line);
    }

    let first = byte_to_line(text, start + leading);
    let last = byte_to_line(text, end - trailing - 1);
    (first, last)
}
