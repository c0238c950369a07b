//! Offset to line/column conversion.
//!
//! Offsets and columns are measured in UTF-16 code units, the default position
//! encoding of the language server protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub length: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Position {
        Position { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.line.saturating_add(1),
            self.character.saturating_add(1)
        )
    }
}

impl Range {
    pub fn new(start: Position, end: Position) -> Range {
        Range { start, end }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

impl TextRange {
    pub fn new(start: u32, length: u32) -> TextRange {
        TextRange { start, length }
    }

    /// Saturates instead of overflowing on ranges that reach past `u32::MAX`.
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }

    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end()
    }
}

/// The document's line ranges, in order. Each line's range includes its line
/// terminator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTable {
    lines: Vec<TextRange>,
}

impl LineTable {
    pub fn new(lines: Vec<TextRange>) -> LineTable {
        LineTable { lines }
    }

    /// Splits `text` on `\n`, `\r\n` and `\r`. The final line is always
    /// present, even when it is empty.
    pub fn from_text(text: &str) -> LineTable {
        let mut lines = Vec::new();
        let mut line_start = 0u32;
        let mut offset = 0u32;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            offset += ch.len_utf16() as u32;
            let is_break = match ch {
                '\n' => true,
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        offset += 1;
                    }
                    true
                }
                _ => false,
            };
            if is_break {
                lines.push(TextRange::new(line_start, offset - line_start));
                line_start = offset;
            }
        }
        lines.push(TextRange::new(line_start, offset - line_start));
        LineTable { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, line: usize) -> Option<&TextRange> {
        self.lines.get(line)
    }

    /// The offset one past the last character of the document.
    pub fn end(&self) -> u32 {
        self.lines.last().map(TextRange::end).unwrap_or(0)
    }

    /// Index of the line containing `offset`, if any.
    pub fn line_containing(&self, offset: u32) -> Option<usize> {
        let idx = self.lines.partition_point(|range| range.end() <= offset);
        self.lines
            .get(idx)
            .filter(|range| range.contains(offset))
            .map(|_| idx)
    }
}

pub fn convert_offset_to_position(offset: u32, lines: &LineTable) -> Position {
    if lines.end() == 0 {
        return Position::new(0, 0);
    }

    // offsets at or past the end land after the last character
    let (offset, adjustment) = if offset >= lines.end() {
        (lines.end() - 1, 1)
    } else {
        (offset, 0)
    };

    let line = lines.line_containing(offset).unwrap_or(lines.len() - 1);
    let start = lines.get(line).map(|range| range.start).unwrap_or(0);
    Position::new(line as u32, offset - start + adjustment)
}

pub fn convert_offsets_to_range(start: u32, end: u32, lines: &LineTable) -> Range {
    Range::new(
        convert_offset_to_position(start, lines),
        convert_offset_to_position(end, lines),
    )
}
