use std::fmt;

use crate::position::Range;

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    WhiteSpace,
    Comment,
    Paren,
    Operator,
    Symbol,
    StringLiteral,
    NumberLiteral,
    Error,
}

impl TokenKind {
    /// Whitespace and comments carry no grammar meaning.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::WhiteSpace | TokenKind::Comment)
    }
}

/// Bracket family of a `Paren` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParenDirection {
    Open,
    Close,
}

/// Sub-kind of an `Operator` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    MemberAccess, // .
    Assignment,   // =
    Separator,    // ,
    EndStatement, // ;
}

/// Lexical error codes carried by `Error` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorCode {
    #[error("string literal is missing its closing quote")]
    MissingEndQuote,
    #[error("block comment is missing its closing `*/`")]
    MissingEndComment,
    #[error("unrecognized input")]
    UnknownToken,
}

impl ErrorCode {
    /// Stable identifier for the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingEndQuote => "MISSING_END_QUOTE",
            ErrorCode::MissingEndComment => "MISSING_END_COMMENT",
            ErrorCode::UnknownToken => "UNKNOWN_TOKEN",
        }
    }
}

/// The decoded value carried by a token. Its shape depends on the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    None,
    Paren(Bracket, ParenDirection),
    Operator(OperatorKind),
    Symbol(String),
    String(String),
    Number(u64),
    Error(ErrorCode),
}

/// A token produced by the tokenizer.
///
/// Equality only looks at the kind and the range.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range,
    pub text: String,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, range: Range, text: String, value: TokenValue) -> Self {
        Self {
            kind,
            range,
            text,
            value,
        }
    }

    /// An error token annotating `range`.
    ///
    /// `text` is empty when the covered characters belong to the token that
    /// follows the error.
    pub fn error(code: ErrorCode, range: Range, text: String) -> Self {
        Self::new(TokenKind::Error, range, text, TokenValue::Error(code))
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self.value {
            TokenValue::Error(code) => Some(code),
            _ => None,
        }
    }

    pub fn operator(&self) -> Option<OperatorKind> {
        match self.value {
            TokenValue::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn paren(&self) -> Option<(Bracket, ParenDirection)> {
        match self.value {
            TokenValue::Paren(bracket, direction) => Some((bracket, direction)),
            _ => None,
        }
    }

    pub fn symbol_name(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Symbols starting with `$` refer to external variables.
    pub fn is_external_symbol(&self) -> bool {
        self.symbol_name().is_some_and(|name| name.starts_with('$'))
    }

    pub fn is_operator(&self, op: OperatorKind) -> bool {
        self.operator() == Some(op)
    }

    pub fn is_paren(&self, bracket: Bracket, direction: ParenDirection) -> bool {
        self.paren() == Some((bracket, direction))
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.range == other.range
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} <{}>", self.kind, self.range)?;
        match &self.value {
            TokenValue::None => Ok(()),
            TokenValue::Paren(bracket, direction) => write!(f, " ({bracket:?}, {direction:?})"),
            TokenValue::Operator(op) => write!(f, " ({op:?})"),
            TokenValue::Symbol(name) => write!(f, " ({name})"),
            TokenValue::String(content) => write!(f, " ({content:?})"),
            TokenValue::Number(n) => write!(f, " ({n})"),
            TokenValue::Error(code) => write!(f, " ({})", code.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::SourcePosition;

    fn range(start: usize, end: usize) -> Range {
        let end = SourcePosition {
            offset: end,
            ..SourcePosition::START
        };
        let start = SourcePosition {
            offset: start,
            ..SourcePosition::START
        };
        Range::between(start, end)
    }

    #[test]
    fn test_equality_ignores_text_and_value() {
        let a = Token::new(
            TokenKind::Symbol,
            range(0, 3),
            "abc".into(),
            TokenValue::Symbol("abc".into()),
        );
        let b = Token::new(TokenKind::Symbol, range(0, 3), String::new(), TokenValue::None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_respects_kind_and_range() {
        let a = Token::new(TokenKind::Symbol, range(0, 3), "abc".into(), TokenValue::None);
        let b = Token::new(TokenKind::StringLiteral, range(0, 3), "abc".into(), TokenValue::None);
        let c = Token::new(TokenKind::Symbol, range(0, 2), "ab".into(), TokenValue::None);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let token = Token::new(
            TokenKind::Operator,
            range(0, 1),
            "=".into(),
            TokenValue::Operator(OperatorKind::Assignment),
        );
        assert_eq!(token.to_string(), "Operator <L1C1-L1C1> (Assignment)");

        let error = Token::error(ErrorCode::MissingEndQuote, range(0, 2), String::new());
        assert_eq!(error.to_string(), "Error <L1C1-L1C2> (MISSING_END_QUOTE)");
    }

    #[test]
    fn test_external_symbol() {
        let token = Token::new(
            TokenKind::Symbol,
            range(0, 7),
            "$survey".into(),
            TokenValue::Symbol("$survey".into()),
        );
        assert!(token.is_external_symbol());
        assert_eq!(token.symbol_name(), Some("$survey"));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::UnknownToken.as_str(), "UNKNOWN_TOKEN");
        assert_eq!(
            ErrorCode::MissingEndComment.to_string(),
            "block comment is missing its closing `*/`"
        );
    }
}
