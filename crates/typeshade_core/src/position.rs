//! Offset to line/column translation.
//!
//! Positions are 0-based; columns count UTF-16 code units, matching what
//! editors built on LSP or Monaco expect.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use typeshade_ast::{NodeId, SyntaxTree};

/// A 0-based line and UTF-16 column.
///
/// Ordering follows document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TextPosition {
    /// 0-based line number.
    pub line: u32,
    /// 0-based column in UTF-16 code units.
    pub column: u32,
}

impl TextPosition {
    /// Creates a new position.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A start/end pair of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

/// An offset that cannot be mapped onto the current text snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("offset {offset} is past the end of the text (length {len})")]
    OffsetOutOfBounds { offset: u32, len: usize },

    #[error("offset {offset} falls inside a multi-byte character")]
    InsideCharacter { offset: u32 },
}

/// Line start table for one text snapshot.
#[derive(Debug, Clone)]
pub struct LineIndex<'t> {
    text: &'t str,
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    /// Indexes the line breaks of `text`.
    pub fn new(text: &'t str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of a 0-based line without its line break.
    pub fn line(&self, line: usize) -> Option<&'t str> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        self.text.get(start..end)
    }

    /// Converts a byte offset into a position.
    pub fn position_at(&self, offset: u32) -> Result<TextPosition, TranslationError> {
        let at = offset as usize;
        if at > self.text.len() {
            return Err(TranslationError::OffsetOutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(at) {
            return Err(TranslationError::InsideCharacter { offset });
        }

        let line = self.line_starts.partition_point(|&start| start <= at) - 1;
        let column = self.text[self.line_starts[line]..at].encode_utf16().count();
        Ok(TextPosition::new(line as u32, column as u32))
    }
}

/// Translates the span of `id` through `offset_to_position`.
///
/// The collaborator is called exactly twice, for the start and then the end
/// offset, even when the first call fails.
pub fn to_range<F>(
    tree: &SyntaxTree,
    id: NodeId,
    mut offset_to_position: F,
) -> Result<TextRange, TranslationError>
where
    F: FnMut(u32) -> Result<TextPosition, TranslationError>,
{
    let span = tree.span(id);
    let start = offset_to_position(span.start);
    let end = offset_to_position(span.end);
    Ok(TextRange {
        start: start?,
        end: end?,
    })
}

/// Translates every node in `ids`, skipping nodes whose offsets do not fit
/// the text snapshot.
pub fn translate_all<F>(
    tree: &SyntaxTree,
    ids: &[NodeId],
    mut offset_to_position: F,
) -> Vec<(NodeId, TextRange)>
where
    F: FnMut(u32) -> Result<TextPosition, TranslationError>,
{
    let mut ranges = Vec::with_capacity(ids.len());
    for &id in ids {
        match to_range(tree, id, &mut offset_to_position) {
            Ok(range) => ranges.push((id, range)),
            Err(e) => warn!(node = %id, kind = %tree.kind(id), "Skipping node: {}", e),
        }
    }
    ranges
}
