//! HttpScript Lexer
//!
//! Tokenizes the Breakout expression language embedded in HttpScript
//! documents. The tokenizer never fails: unrecognized or malformed input
//! becomes `Error` tokens, and every character of the source ends up in
//! exactly one token's text.
//!
//! # Example
//!
//! ```
//! use httpscript_lexer::{TokenKind, Tokenizer};
//!
//! let tokens = Tokenizer::tokenize("answer = 42;");
//! assert_eq!(tokens[0].kind, TokenKind::Symbol);
//! assert_eq!(tokens.len(), 6);
//! ```

pub mod buffer;
pub mod cursor;
pub mod position;
pub mod rules;
pub mod token;
pub mod tokenizer;

pub use buffer::BacktrackBuffer;
pub use cursor::SourceCursor;
pub use position::{Range, SourcePosition};
pub use rules::ParsingMode;
pub use token::{Bracket, ErrorCode, OperatorKind, ParenDirection, Token, TokenKind, TokenValue};
pub use tokenizer::Tokenizer;
