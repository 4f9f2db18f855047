//! Breakout program parser.
//!
//! Recursive-descent recognizer over the Breakout token stream. Whitespace,
//! comments and error tokens are skipped before every token test.
//!
//! ```text
//! Program     := (Expression ';'?)*
//! Expression  := Assignment | Invocation
//! Assignment  := SYMBOL '=' Expression
//! Invocation  := Operand Arguments*
//! Operand     := MemberChain | STRING | NUMBER
//! MemberChain := SYMBOL ('.' SYMBOL)*
//! Arguments   := '(' (Expression (',' Expression)*)? ')'
//! ```

use httpscript_lexer::{
    Bracket, OperatorKind, ParenDirection, ParsingMode, Token, TokenKind, Tokenizer,
};
use tracing::{debug, trace};

use crate::ParseError;
use crate::stack::ensure_sufficient_stack;

type Rule = fn(&mut Parser) -> bool;

/// Breakout parser for one source buffer.
pub struct Parser {
    tokenizer: Tokenizer,
}

impl Parser {
    /// Create a parser for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            tokenizer: Tokenizer::with_mode(source, ParsingMode::Breakout),
        }
    }

    /// Parse source code, reporting only whether it is a valid program.
    pub fn parse(source: &str) -> Result<(), ParseError> {
        if Parser::new(source).try_parse() {
            Ok(())
        } else {
            Err(ParseError)
        }
    }

    /// True iff the whole token stream forms a program.
    pub fn try_parse(&mut self) -> bool {
        self.program()
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn program(&mut self) -> bool {
        while self.peek().is_some() {
            if !self.expression() {
                debug!(
                    at = ?self.peek().map(|t| t.range),
                    "no expression matches"
                );
                return false;
            }
            self.eat_operator(OperatorKind::EndStatement);
        }
        true
    }

    /// Every recursive path passes through here, so this is where the
    /// stack is grown for deeply nested input.
    fn expression(&mut self) -> bool {
        ensure_sufficient_stack(|| self.first_of(&[Parser::assignment, Parser::invocation]))
    }

    /// Speculative: a leading symbol is only a target once `=` follows it.
    fn assignment(&mut self) -> bool {
        self.speculate("assignment", |p| {
            p.eat(TokenKind::Symbol) && p.eat_operator(OperatorKind::Assignment) && p.expression()
        })
    }

    fn invocation(&mut self) -> bool {
        if !self.operand() {
            return false;
        }
        while self.arguments() {}
        true
    }

    fn operand(&mut self) -> bool {
        self.member_chain()
            || self.eat(TokenKind::StringLiteral)
            || self.eat(TokenKind::NumberLiteral)
    }

    fn member_chain(&mut self) -> bool {
        if !self.eat(TokenKind::Symbol) {
            return false;
        }
        while self.speculate("member access", |p| {
            p.eat_operator(OperatorKind::MemberAccess) && p.eat(TokenKind::Symbol)
        }) {}
        true
    }

    fn arguments(&mut self) -> bool {
        self.speculate("arguments", |p| {
            if !p.eat_paren(ParenDirection::Open) {
                return false;
            }
            if p.eat_paren(ParenDirection::Close) {
                return true;
            }
            loop {
                if !p.expression() {
                    return false;
                }
                if p.eat_paren(ParenDirection::Close) {
                    return true;
                }
                if !p.eat_operator(OperatorKind::Separator) {
                    return false;
                }
            }
        })
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Try each rule in order, stopping at the first that matches.
    fn first_of(&mut self, alternatives: &[Rule]) -> bool {
        alternatives.iter().any(|rule| rule(self))
    }

    /// Run `rule` behind a restore point: keep its progress on success,
    /// rewind to where it started on failure.
    fn speculate(&mut self, name: &str, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        self.tokenizer.push_restore_point();
        if rule(self) {
            trace!(rule = name, "commit");
            self.tokenizer.discard_restore_point();
            true
        } else {
            trace!(rule = name, "backtrack");
            self.tokenizer.pop_restore_point();
            false
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    /// Next significant token. Skips whitespace, comments and errors.
    fn peek(&mut self) -> Option<&Token> {
        while self
            .tokenizer
            .peek_token()
            .is_some_and(|t| t.kind.is_trivia() || t.kind == TokenKind::Error)
        {
            self.tokenizer.consume_token();
        }
        self.tokenizer.peek_token()
    }

    fn eat_if(&mut self, matches: impl FnOnce(&Token) -> bool) -> bool {
        if self.peek().is_some_and(matches) {
            self.tokenizer.consume_token();
            true
        } else {
            false
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.eat_if(|t| t.kind == kind)
    }

    fn eat_operator(&mut self, op: OperatorKind) -> bool {
        self.eat_if(|t| t.is_operator(op))
    }

    fn eat_paren(&mut self, direction: ParenDirection) -> bool {
        self.eat_if(|t| t.is_paren(Bracket::Round, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parses(source: &str) -> bool {
        Parser::new(source).try_parse()
    }

    // =========================================================================
    // Accepted programs
    // =========================================================================

    #[test]
    fn test_empty_program() {
        assert!(parses(""));
        assert!(parses("  \n\t"));
        assert!(parses("// just a comment\n/* and another */"));
    }

    #[test]
    fn test_simple_values() {
        assert!(parses("symbol"));
        assert!(parses("'text'"));
        assert!(parses("\"text\""));
        assert!(parses("42"));
        assert!(parses("$survey"));
    }

    #[test]
    fn test_expression_sequence() {
        assert!(parses("a 'b' 3"));
        assert!(parses("a; b; c;"));
    }

    #[test]
    fn test_assignment() {
        assert!(parses("myVal = 1"));
        assert!(parses("a = b = c;"));
        assert!(parses("a = 'x' b = 2"));
    }

    #[test]
    fn test_member_chain() {
        assert!(parses("test.var"));
        assert!(parses("a.b.c.d;"));
    }

    #[test]
    fn test_invocation() {
        assert!(parses("run()"));
        assert!(parses("run(1)"));
        assert!(parses("obj.method(a, b.c, 'd', 4)"));
        assert!(parses("make(1)(2)"));
        assert!(parses("outer(inner(x), y = 2)"));
    }

    #[test]
    fn test_statement() {
        assert!(parses("myVal = symbol.method(something, test.var, 'some string');"));
    }

    #[test]
    fn test_program_with_comment() {
        let program = "\n// assign the thing to the thing\nmyVal = symbol.method(321, test.var, 'some string');\n";
        assert!(parses(program));
        assert_eq!(Parser::parse(program), Ok(()));
    }

    #[test]
    fn test_error_tokens_are_skipped() {
        assert!(parses("a ✨ = 1"));
        assert!(parses("x = \"unterminated"));
        assert!(parses("/* never closed"));
    }

    // =========================================================================
    // Rejected programs
    // =========================================================================

    #[test]
    fn test_rejected_programs() {
        for source in [
            "a =",
            "a = ;",
            "= 1",
            "run(",
            "run(a,)",
            "run(a b)",
            "(a)",
            "a.;",
            "a.1",
            "a;;",
            "[1]",
            "1 = 2",
        ] {
            assert!(!parses(source), "{source:?} should not parse");
        }
    }

    #[test]
    fn test_parse_error() {
        let err = Parser::parse("a = ;").unwrap_err();
        assert_eq!(err, ParseError);
        assert!(err.to_string().contains("Parse error"));
    }

    // =========================================================================
    // Backtracking
    // =========================================================================

    #[test]
    fn test_failed_assignment_rewinds_to_symbol() {
        let mut parser = Parser::new("symbol");
        assert!(!parser.assignment());

        let token = parser.peek().cloned().unwrap();
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.range.start_offset, 0);
        assert_eq!(parser.tokenizer.consumed_tokens().count(), 0);

        assert!(parser.invocation());
        assert!(parser.peek().is_none());
    }

    #[test]
    fn test_backtracking_does_not_rescan() {
        let mut parser = Parser::new("symbol.method");
        assert!(!parser.assignment());
        let scanned = parser.tokenizer.position();
        assert_eq!(scanned.offset, 7);

        assert!(parser.expression());
        assert_eq!(parser.tokenizer.consumed_tokens().count(), 3);
    }

    #[test]
    fn test_failed_arguments_rewind() {
        let mut parser = Parser::new("f(a b");
        assert!(parser.invocation());
        let token = parser.peek().cloned().unwrap();
        assert!(token.is_paren(Bracket::Round, ParenDirection::Open));
    }

    #[test]
    fn test_dangling_member_access_rewinds() {
        let mut parser = Parser::new("a.");
        assert!(parser.member_chain());
        let token = parser.peek().cloned().unwrap();
        assert!(token.is_operator(OperatorKind::MemberAccess));
    }

    #[test]
    fn test_deeply_nested_invocations() {
        let depth = 20_000;
        let closed = format!("{}x{}", "f(".repeat(depth), ")".repeat(depth));
        assert!(parses(&closed));
        assert!(!parses(&"f(".repeat(depth)));
    }

    #[test]
    fn test_long_assignment_chain() {
        assert!(parses(&("a = ".repeat(20_000) + "1")));
        assert!(!parses(&"a = ".repeat(20_000)));
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn program_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just("a"),
                Just("b.c"),
                Just("42"),
                Just("'s'"),
                Just(" "),
                Just("\n"),
                Just("="),
                Just("."),
                Just(","),
                Just(";"),
                Just("("),
                Just(")"),
                Just("[]"),
                Just("/* c */"),
                Just("✨"),
            ],
            0..24,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_restore_points_are_balanced(source in program_strategy()) {
            let mut parser = Parser::new(&source);
            let first = parser.try_parse();
            prop_assert_eq!(parser.tokenizer.restore_depth(), 0);
            prop_assert_eq!(Parser::new(&source).try_parse(), first);
        }
    }
}
