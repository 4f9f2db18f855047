//! HttpScript Parser
//!
//! Recognizes Breakout programs on top of the backtrackable token stream
//! from `httpscript-lexer`. The parser reports success or failure only;
//! lexical problems surface as error tokens and are skipped.
//!
//! # Example
//!
//! ```
//! use httpscript_parser::Parser;
//!
//! assert!(Parser::new("myVal = symbol.method(1, 'two');").try_parse());
//! assert!(Parser::parse("myVal = ;").is_err());
//! ```

pub mod parser;
mod stack;

pub use parser::Parser;

/// The source is not a well-formed Breakout program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Parse error: source is not a well-formed Breakout program")]
pub struct ParseError;
