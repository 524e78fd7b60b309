//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: declarations, `if`, `while`, `return`, blocks
//! - `expressions`: expressions with precedence climbing
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
#[error("SyntaxError: {message} (line {}, column {})", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Deepest nesting of blocks, parentheses, unary operators and operator
/// chains the parser accepts
pub const MAX_NESTING_DEPTH: usize = 64;

/// Recursive descent parser for console scripts
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            depth: 0,
        })
    }

    /// Parse the entire script (top-level statements)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.nodes.push(self.parse_statement()?);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {ctx}"),
        )
    }

    /// Statement terminator: `;`, or implied before `}`, at end of input,
    /// and at a line break
    pub(crate) fn expect_statement_end(&mut self, ctx: &str) -> Result<(), ParseError> {
        if self.match_token(&Token::Semicolon(self.current_location())) {
            return Ok(());
        }
        if self.is_at_end()
            || self.check(&Token::RBrace(self.current_location()))
            || self.at_line_break()
        {
            return Ok(());
        }
        Err(self.error_here(&format!("Expected ';' {ctx}")))
    }

    /// Whether the current token starts a later line than the one just consumed
    pub(crate) fn at_line_break(&self) -> bool {
        self.position > 0 && self.current_location().line > self.previous_location().line
    }

    /// Run `parse` one nesting level deeper
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.check_nesting(1)?;
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Fail once `extra` more levels would pass [`MAX_NESTING_DEPTH`]
    pub(crate) fn check_nesting(&self, extra: usize) -> Result<(), ParseError> {
        if self.depth + extra > MAX_NESTING_DEPTH {
            return Err(ParseError {
                message: "Maximum nesting depth exceeded".to_string(),
                location: self.current_location(),
            });
        }
        Ok(())
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(self.error_here("Expected identifier"))
        }
    }

    pub(crate) fn error_here(&self, message: &str) -> ParseError {
        ParseError {
            message: format!("{}, found {}", message, self.peek()),
            location: self.current_location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse_program().unwrap()
    }

    #[test]
    fn test_parse_return_string() {
        let program = parse(r#"return "Hello World!";"#);

        assert_eq!(program.nodes.len(), 1);
        match &program.nodes[0] {
            AstNode::Return { expr: Some(expr), .. } => {
                assert!(matches!(**expr, AstNode::StringLiteral(ref s, _) if s == "Hello World!"));
            }
            other => panic!("Expected return statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_console_log_call() {
        let program = parse(r#"console.log("QuikConsole rocks!");"#);

        match &program.nodes[0] {
            AstNode::ExpressionStatement { expr, .. } => match &**expr {
                AstNode::Call { callee, args, .. } => {
                    assert_eq!(args.len(), 1);
                    assert!(matches!(
                        **callee,
                        AstNode::MemberAccess { ref property, .. } if property == "log"
                    ));
                }
                other => panic!("Expected call, got {:?}", other),
            },
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon_allowed_at_end() {
        let program = parse("let x = 1\nx + 1");
        assert_eq!(program.nodes.len(), 2);
    }

    #[test]
    fn test_missing_semicolon_between_statements_is_error() {
        let err = Parser::new("1 2").unwrap().parse_program().unwrap_err();
        assert!(err.message.starts_with("Expected ';' after expression"));
        assert_eq!(err.location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_nesting_limit() {
        let within = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        assert!(Parser::new(&within).unwrap().parse_program().is_ok());

        let depth = MAX_NESTING_DEPTH + 1;
        let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        let err = Parser::new(&nested).unwrap().parse_program().unwrap_err();
        assert_eq!(err.message, "Maximum nesting depth exceeded");

        let blocks = format!("{}{}", "{".repeat(500), "}".repeat(500));
        let err = Parser::new(&blocks).unwrap().parse_program().unwrap_err();
        assert_eq!(err.message, "Maximum nesting depth exceeded");
    }

    #[test]
    fn test_long_operator_chain_is_limited() {
        let sum = vec!["1"; 500].join(" + ");
        let err = Parser::new(&sum).unwrap().parse_program().unwrap_err();
        assert_eq!(err.message, "Maximum nesting depth exceeded");

        let negations = format!("{}1", "-".repeat(500));
        assert!(Parser::new(&negations).unwrap().parse_program().is_err());
    }

    #[test]
    fn test_lex_error_converts() {
        let err = Parser::new("let s = 'open").err().unwrap();
        assert_eq!(err.message, "Unterminated string literal");
    }
}
