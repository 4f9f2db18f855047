//! Rule set for the Breakout expression language.
//!
//! Priority order: brackets, operator punctuation, comments, string
//! literals, number literals, symbols.

use super::{Lexed, Rule};
use crate::cursor::SourceCursor;
use crate::token::{Bracket, ErrorCode, OperatorKind, ParenDirection, TokenKind, TokenValue};

pub const RULES: &[Rule] = &[
    scan_paren,
    scan_operator,
    scan_comment,
    scan_string,
    scan_number,
    scan_symbol,
];

/// One of `()[]{}`.
pub fn scan_paren(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();
    let (bracket, direction) = match cursor.peek()? {
        '(' => (Bracket::Round, ParenDirection::Open),
        ')' => (Bracket::Round, ParenDirection::Close),
        '[' => (Bracket::Square, ParenDirection::Open),
        ']' => (Bracket::Square, ParenDirection::Close),
        '{' => (Bracket::Curly, ParenDirection::Open),
        '}' => (Bracket::Curly, ParenDirection::Close),
        _ => return None,
    };
    cursor.advance();
    Some(Lexed::new(
        start,
        cursor,
        TokenKind::Paren,
        TokenValue::Paren(bracket, direction),
    ))
}

/// One of `. = , ;`.
pub fn scan_operator(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();
    let op = match cursor.peek()? {
        '.' => OperatorKind::MemberAccess,
        '=' => OperatorKind::Assignment,
        ',' => OperatorKind::Separator,
        ';' => OperatorKind::EndStatement,
        _ => return None,
    };
    cursor.advance();
    Some(Lexed::new(start, cursor, TokenKind::Operator, TokenValue::Operator(op)))
}

/// `// ...` up to and including the newline, or a nestable `/* ... */`.
pub fn scan_comment(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();

    if cursor.try_match_sequence("//") {
        while let Some(c) = cursor.advance() {
            if c == '\n' {
                break;
            }
        }
        return Some(Lexed::new(start, cursor, TokenKind::Comment, TokenValue::None));
    }

    if !cursor.try_match_sequence("/*") {
        return None;
    }

    let mut depth = 0usize;
    while let Some(c) = cursor.advance() {
        if c == '/' && cursor.try_match('*') {
            depth += 1;
        } else if c == '*' && cursor.try_match('/') {
            if depth == 0 {
                return Some(Lexed::new(start, cursor, TokenKind::Comment, TokenValue::None));
            }
            depth -= 1;
        }
    }

    // Ran out of input: the rest of the buffer is the comment.
    Some(
        Lexed::new(start, cursor, TokenKind::Comment, TokenValue::None)
            .with_error(ErrorCode::MissingEndComment),
    )
}

/// `'...'` or `"..."`, content taken verbatim.
///
/// A newline ends an unterminated string before the newline, so the newline
/// is still available as whitespace.
pub fn scan_string(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();
    let quote = cursor.try_match_any(&['\'', '"'])?;
    let content_start = cursor.snapshot();

    loop {
        match cursor.peek() {
            Some(c) if c == quote => {
                let content = cursor.text_since(content_start);
                cursor.advance();
                return Some(Lexed::new(
                    start,
                    cursor,
                    TokenKind::StringLiteral,
                    TokenValue::String(content),
                ));
            }
            Some('\n') | None => {
                let content = cursor.text_since(content_start);
                return Some(
                    Lexed::new(start, cursor, TokenKind::StringLiteral, TokenValue::String(content))
                        .with_error(ErrorCode::MissingEndQuote),
                );
            }
            Some(_) => {
                cursor.advance();
            }
        }
    }
}

/// Maximal run of ASCII digits, decoded as base 10 (saturating).
pub fn scan_number(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();
    let mut value: u64 = 0;

    while let Some(digit) = cursor.peek().and_then(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(u64::from(digit));
        cursor.advance();
    }

    if cursor.position() == start {
        return None;
    }
    Some(Lexed::new(start, cursor, TokenKind::NumberLiteral, TokenValue::Number(value)))
}

/// Letter, `_` or `$` followed by letters, digits or `_`.
pub fn scan_symbol(mut cursor: SourceCursor<'_>) -> Option<Lexed<'_>> {
    let start = cursor.snapshot();
    match cursor.peek()? {
        c if c.is_alphabetic() || c == '_' || c == '$' => {
            cursor.advance();
        }
        _ => return None,
    }

    while cursor.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
        cursor.advance();
    }

    let name = cursor.text_since(start);
    Some(Lexed::new(start, cursor, TokenKind::Symbol, TokenValue::Symbol(name)))
}
