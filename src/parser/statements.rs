//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | if_stmt | while_stmt | return_stmt
//!             | block | expr_stmt
//! var_decl  ::= ("let" | "const" | "var") ident ["=" expr] [";"]
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        // Empty statement
        while self.match_token(&Token::Semicolon(loc)) {
            if self.is_at_end() || self.check(&Token::RBrace(loc)) {
                return Ok(AstNode::Block {
                    statements: Vec::new(),
                    location: loc,
                });
            }
        }
        let loc = self.current_location();

        if self.match_token(&Token::Return(loc)) {
            return self.parse_return_statement();
        }

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::While(loc)) {
            return self.parse_while_statement();
        }

        if let Some(kind) = self.match_declaration_keyword() {
            return self.parse_variable_declaration(kind);
        }

        if self.match_token(&Token::LBrace(loc)) {
            let statements = self.nested(Self::parse_block_statements)?;
            self.expect_rbrace("after block")?;
            return Ok(AstNode::Block {
                statements,
                location: loc,
            });
        }

        // Otherwise, it's an expression statement
        let expr = self.parse_expression()?;
        self.expect_statement_end("after expression")?;
        Ok(AstNode::ExpressionStatement {
            expr: Box::new(expr),
            location: loc,
        })
    }

    fn match_declaration_keyword(&mut self) -> Option<DeclKind> {
        let kind = match self.peek() {
            Token::Let(_) => DeclKind::Let,
            Token::Const(_) => DeclKind::Const,
            Token::Var(_) => DeclKind::Var,
            _ => return None,
        };
        self.advance();
        Some(kind)
    }

    /// Parse `let`/`const`/`var` declaration (keyword already consumed)
    fn parse_variable_declaration(&mut self, kind: DeclKind) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();
        let name = self.expect_identifier()?;

        let init = if self.match_token(&Token::Eq(self.current_location())) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        if kind == DeclKind::Const && init.is_none() {
            return Err(ParseError {
                message: "Missing initializer in const declaration".to_string(),
                location: loc,
            });
        }

        self.expect_statement_end("after variable declaration")?;

        Ok(AstNode::VarDecl {
            kind,
            name,
            init,
            location: loc,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();

        let expr = if self.check(&Token::Semicolon(self.current_location()))
            || self.check(&Token::RBrace(self.current_location()))
            || self.is_at_end()
            || self.at_line_break()
        {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect_statement_end("after return")?;

        Ok(AstNode::Return {
            expr,
            location: loc,
        })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'if'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_statement_or_block()?;

        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            Some(self.parse_statement_or_block()?)
        } else {
            None
        };

        Ok(AstNode::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.previous_location();

        self.expect_lparen("after 'while'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after while condition")?;

        let body = self.parse_statement_or_block()?;

        Ok(AstNode::While {
            condition,
            body,
            location: loc,
        })
    }

    /// A braced block yields its statements, a single statement yields itself
    fn parse_statement_or_block(&mut self) -> Result<Vec<AstNode>, ParseError> {
        if self.match_token(&Token::LBrace(self.current_location())) {
            let statements = self.nested(Self::parse_block_statements)?;
            self.expect_rbrace("after block")?;
            Ok(statements)
        } else {
            Ok(vec![self.nested(Self::parse_statement)?])
        }
    }
}
