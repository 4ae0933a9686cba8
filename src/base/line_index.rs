//! Offset ↔ line/column conversion.

use std::sync::Arc;

use text_size::{TextRange, TextSize};

use super::{Position, Segment, Span};

/// Line start table for one document text.
///
/// Columns are counted in Unicode scalar values. The text is shared, not
/// copied, with whoever passes in an `Arc<str>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: Arc<str>,
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end clamp to the end of the text.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(&*self.text));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let column = self.text[start..usize::from(offset)].chars().count();
        Position::new(line, column)
    }

    /// Convert a line/column position to a byte offset.
    ///
    /// Returns `None` when the line does not exist; columns past the end of
    /// the line clamp to the line end.
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        let start = *self.line_starts.get(position.line)?;
        let end = self
            .line_starts
            .get(position.line + 1)
            .copied()
            .unwrap_or_else(|| TextSize::of(&*self.text));
        let line_text = &self.text[usize::from(start)..usize::from(end)];
        let within = line_text
            .char_indices()
            .nth(position.column)
            .map(|(idx, _)| idx)
            .unwrap_or_else(|| line_text.trim_end_matches('\n').len());
        Some(start + TextSize::new(within as u32))
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }

    pub fn segment(&self, range: TextRange) -> Segment {
        Segment::new(range, self.span(range))
    }
}
