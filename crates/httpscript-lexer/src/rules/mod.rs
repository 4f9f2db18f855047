//! Token-matching rules, keyed by parsing mode.
//!
//! A rule receives a cursor positioned at a prospective token start and
//! scans with its own copy. It returns `None` without side effects when its
//! entry test fails, or the produced token(s) together with the advanced
//! cursor.

pub mod breakout;

use crate::cursor::{Snapshot, SourceCursor};
use crate::token::{ErrorCode, Token, TokenKind, TokenValue};

/// Selects the active rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParsingMode {
    #[default]
    Breakout,
    /// Reserved. Only whitespace is recognized in this mode.
    Http,
}

impl ParsingMode {
    /// Rules for this mode, in priority order.
    pub fn rules(self) -> &'static [Rule] {
        match self {
            ParsingMode::Breakout => breakout::RULES,
            ParsingMode::Http => &[],
        }
    }
}

/// A single token-matching rule.
pub type Rule = for<'a> fn(SourceCursor<'a>) -> Option<Lexed<'a>>;

/// Output of a matching rule: a best-effort token, an optional error
/// describing a recoverable problem with it, and the cursor after it.
#[derive(Debug, Clone)]
pub struct Lexed<'a> {
    pub token: Token,
    pub error: Option<Token>,
    pub rest: SourceCursor<'a>,
}

impl<'a> Lexed<'a> {
    /// A clean token spanning `start` up to `rest`.
    pub fn new(
        start: Snapshot,
        rest: SourceCursor<'a>,
        kind: TokenKind,
        value: TokenValue,
    ) -> Self {
        let token = Token::new(kind, rest.range_since(start), rest.text_since(start), value);
        Self {
            token,
            error: None,
            rest,
        }
    }

    /// Attach an error covering the same span as the token.
    pub fn with_error(mut self, code: ErrorCode) -> Self {
        self.error = Some(Token::error(code, self.token.range, String::new()));
        self
    }
}

/// Try whitespace, then every rule of `mode` in order.
pub fn scan(cursor: SourceCursor<'_>, mode: ParsingMode) -> Option<Lexed<'_>> {
    if let Some(lexed) = scan_whitespace(cursor) {
        return Some(lexed);
    }
    mode.rules().iter().find_map(|rule| rule(cursor))
}

/// Maximal run of whitespace, shared by every mode.
pub fn scan_whitespace(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();
    while cursor.peek().is_some_and(char::is_whitespace) {
        cursor.advance();
    }
    if cursor.position() == start {
        return None;
    }
    Some(Lexed::new(start, cursor, TokenKind::WhiteSpace, TokenValue::None))
}
