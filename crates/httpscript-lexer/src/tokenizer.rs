//! Backtrackable tokenizer.
//!
//! Tokens are produced lazily, one lookahead batch at a time: an optional
//! error token followed by the real token. Produced tokens are kept in a
//! [`BacktrackBuffer`], so a parser can rewind to a restore point without
//! the source being scanned twice.

use tracing::{debug, trace};

use crate::buffer::BacktrackBuffer;
use crate::cursor::SourceCursor;
use crate::position::SourcePosition;
use crate::rules::{self, Lexed, ParsingMode};
use crate::token::{ErrorCode, Token};

/// A buffered token and the position its text starts at.
///
/// Switching modes rewinds the source cursor to the `start` of the first
/// discarded token.
#[derive(Debug, Clone)]
struct Lexeme {
    start: SourcePosition,
    token: Token,
}

/// Tokenizer for one parse session.
pub struct Tokenizer {
    chars: Vec<char>,
    pos: SourcePosition,
    mode: ParsingMode,
    lookahead: BacktrackBuffer<Lexeme>,
}

impl Tokenizer {
    /// Create a tokenizer in `Breakout` mode.
    pub fn new(source: &str) -> Self {
        Self::with_mode(source, ParsingMode::default())
    }

    /// Create a tokenizer with a specific initial mode.
    pub fn with_mode(source: &str, mode: ParsingMode) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: SourcePosition::START,
            mode,
            lookahead: BacktrackBuffer::new(),
        }
    }

    /// Tokenize the entire source in `Breakout` mode.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Tokenizer::new(source).collect()
    }

    pub fn mode(&self) -> ParsingMode {
        self.mode
    }

    /// Switch the active rule set.
    ///
    /// Tokens that were produced but not yet read are discarded and the
    /// source cursor goes back to where the first of them started, so they
    /// get re-derived under the new mode.
    pub fn set_mode(&mut self, mode: ParsingMode) {
        debug!(from = ?self.mode, to = ?mode, "switch parsing mode");
        self.mode = mode;

        if let Some(first) = self.lookahead.truncate_unread() {
            debug!(offset = first.start.offset, "discard pending lookahead");
            self.pos = first.start;
        }
    }

    /// Position of the source cursor. Lookahead tokens lie before it.
    pub fn position(&self) -> SourcePosition {
        self.pos
    }

    /// True while there is unscanned source or unread lookahead.
    pub fn has_more_tokens(&self) -> bool {
        self.pos.offset < self.chars.len() || self.lookahead.unread() > 0
    }

    /// The next token, without consuming it.
    pub fn peek_token(&mut self) -> Option<&Token> {
        self.fill();
        self.lookahead.peek().map(|lexeme| &lexeme.token)
    }

    /// Consume and return the next token.
    pub fn consume_token(&mut self) -> Option<Token> {
        self.fill();
        self.lookahead.advance().map(|lexeme| lexeme.token.clone())
    }

    /// Tokens already consumed, in order.
    pub fn consumed_tokens(&self) -> impl Iterator<Item = &Token> {
        self.lookahead.consumed().iter().map(|lexeme| &lexeme.token)
    }

    pub fn push_restore_point(&mut self) {
        self.lookahead.push_restore_point();
    }

    /// Rewind to the most recent restore point.
    pub fn pop_restore_point(&mut self) {
        self.lookahead.pop_restore_point();
    }

    /// Keep the current read position and forget the most recent restore point.
    pub fn discard_restore_point(&mut self) {
        self.lookahead.discard_restore_point();
    }

    /// Number of active restore points.
    pub fn restore_depth(&self) -> usize {
        self.lookahead.restore_depth()
    }

    fn fill(&mut self) {
        if self.lookahead.unread() > 0 || self.pos.offset >= self.chars.len() {
            return;
        }

        let start = self.pos;
        let cursor = SourceCursor::at(&self.chars, start);
        self.pos = scan_batch(cursor, self.mode, &mut self.lookahead);

        trace!(
            mode = ?self.mode,
            from = start.offset,
            to = self.pos.offset,
            tokens = self.lookahead.unread(),
            "lexed batch"
        );
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.consume_token()
    }
}

/// Scan one batch into `out`, returning the cursor position after it.
fn scan_batch(
    cursor: SourceCursor<'_>,
    mode: ParsingMode,
    out: &mut BacktrackBuffer<Lexeme>,
) -> SourcePosition {
    let start = cursor.position();
    if let Some(lexed) = rules::scan(cursor, mode) {
        return enqueue(out, start, lexed);
    }
    if cursor.is_at_end() {
        return start;
    }
    recover(cursor, mode, out)
}

/// Skip characters one at a time until some rule matches again, reporting
/// everything skipped as a single `UnknownToken` error.
fn recover(
    mut cursor: SourceCursor<'_>,
    mode: ParsingMode,
    out: &mut BacktrackBuffer<Lexeme>,
) -> SourcePosition {
    let start = cursor.snapshot();

    while cursor.skip() {
        if let Some(lexed) = rules::scan(cursor, mode) {
            trace!(from = start.offset, to = cursor.position().offset, "recovered");
            out.push(unknown(start, &cursor));
            return enqueue(out, cursor.position(), lexed);
        }
    }

    trace!(from = start.offset, "unrecognized input up to end of buffer");
    out.push(unknown(start, &cursor));
    cursor.position()
}

fn unknown(start: SourcePosition, cursor: &SourceCursor<'_>) -> Lexeme {
    Lexeme {
        start,
        token: Token::error(
            ErrorCode::UnknownToken,
            cursor.range_since(start),
            cursor.text_since(start),
        ),
    }
}

fn enqueue(
    out: &mut BacktrackBuffer<Lexeme>,
    start: SourcePosition,
    lexed: Lexed<'_>,
) -> SourcePosition {
    if let Some(error) = lexed.error {
        out.push(Lexeme { start, token: error });
    }
    out.push(Lexeme {
        start,
        token: lexed.token,
    });
    lexed.rest.position()
}
