//! Character-level cursor over an immutable source buffer.

use crate::position::{Range, SourcePosition};

/// A saved cursor position.
///
/// Snapshots are plain values: restoring one is O(1), and discarding one is
/// just dropping it.
pub type Snapshot = SourcePosition;

/// Scan position over a `char` buffer.
///
/// The cursor is `Copy`, so a rule can scan with its own copy and hand the
/// advanced cursor back only when it matches. A CR-LF pair is read as a
/// single logical `'\n'` spanning two offsets.
#[derive(Debug, Clone, Copy)]
pub struct SourceCursor<'a> {
    chars: &'a [char],
    pos: SourcePosition,
}

impl<'a> SourceCursor<'a> {
    /// Create a cursor at the start of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self::at(chars, SourcePosition::START)
    }

    /// Create a cursor at a previously recorded position.
    pub fn at(chars: &'a [char], pos: SourcePosition) -> Self {
        debug_assert!(pos.offset <= chars.len(), "position past end of source");
        Self { chars, pos }
    }

    pub fn position(&self) -> SourcePosition {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos.offset >= self.chars.len()
    }

    /// The next logical character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.peek_with_width().map(|(c, _)| c)
    }

    /// Consume one logical character.
    pub fn advance(&mut self) -> Option<char> {
        let (c, width) = self.peek_with_width()?;
        let mut next = self.pos;
        next.offset += width;
        if c == '\n' {
            next.prev_line_start = next.line_start;
            next.line_start = next.offset;
            next.line += 1;
        }
        self.pos = next;
        Some(c)
    }

    /// Consume one logical character, reporting whether there was one.
    pub fn skip(&mut self) -> bool {
        self.advance().is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.pos
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.pos = snapshot;
    }

    /// Advance past `expected` if it is the next character.
    pub fn try_match(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance past the next character if it is one of `set`, returning it.
    pub fn try_match_any(&mut self, set: &[char]) -> Option<char> {
        match self.peek() {
            Some(c) if set.contains(&c) => self.advance(),
            _ => None,
        }
    }

    /// Advance past `literal` only if it matches completely.
    pub fn try_match_sequence(&mut self, literal: &str) -> bool {
        let snapshot = self.snapshot();
        for expected in literal.chars() {
            if !self.try_match(expected) {
                self.restore(snapshot);
                return false;
            }
        }
        true
    }

    /// Raw source text between `from` and the current position.
    pub fn text_since(&self, from: Snapshot) -> String {
        self.chars[from.offset..self.pos.offset].iter().collect()
    }

    /// Range between `from` and the current position.
    pub fn range_since(&self, from: Snapshot) -> Range {
        Range::between(from, self.pos)
    }

    fn peek_with_width(&self) -> Option<(char, usize)> {
        let offset = self.pos.offset;
        let c = *self.chars.get(offset)?;
        if c == '\r' && self.chars.get(offset + 1) == Some(&'\n') {
            Some(('\n', 2))
        } else {
            Some((c, 1))
        }
    }
}
