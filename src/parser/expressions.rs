//! Expression parsing implementation
//!
//! Binary operators use one method per precedence level, lowest first:
//!
//! ```text
//! assignment → ternary → || → && → equality → relational
//!            → additive → multiplicative → unary → postfix → primary
//! ```
//!
//! Assignment and ternary are right-associative; everything else is
//! left-associative.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Self::parse_assignment)
    }

    /// Parse assignment or ternary (right-associative)
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_ternary()?;

        let loc = self.current_location();
        let compound_op = match self.peek() {
            Token::Eq(_) => None,
            Token::PlusEq(_) => Some(BinOp::Add),
            Token::MinusEq(_) => Some(BinOp::Sub),
            Token::StarEq(_) => Some(BinOp::Mul),
            Token::SlashEq(_) => Some(BinOp::Div),
            Token::PercentEq(_) => Some(BinOp::Mod),
            _ => return Ok(expr),
        };

        let name = match expr {
            AstNode::Variable(name, _) => name,
            _ => {
                return Err(ParseError {
                    message: "Invalid left-hand side in assignment".to_string(),
                    location: loc,
                });
            }
        };

        self.advance(); // consume the assignment operator
        let rhs = Box::new(self.parse_expression()?);

        Ok(match compound_op {
            None => AstNode::Assignment {
                name,
                rhs,
                location: loc,
            },
            Some(op) => AstNode::CompoundAssignment {
                name,
                op,
                rhs,
                location: loc,
            },
        })
    }

    /// Parse ternary: condition ? true_expr : false_expr
    fn parse_ternary(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_logical_or()?;

        if self.match_token(&Token::Question(self.current_location())) {
            let loc = self.previous_location();
            let true_expr = Box::new(self.parse_expression()?);
            self.expect_token(
                &Token::Colon(self.current_location()),
                "Expected ':' in ternary expression",
            )?;
            let false_expr = Box::new(self.parse_expression()?);

            return Ok(AstNode::TernaryOp {
                condition: Box::new(expr),
                true_expr,
                false_expr,
                location: loc,
            });
        }

        Ok(expr)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_logical_and()?;
        let mut chain = 0;

        while self.match_token(&Token::OrOr(self.current_location())) {
            let loc = self.previous_location();
            chain += 1;
            self.check_nesting(chain)?;
            let right = Box::new(self.parse_logical_and()?);
            left = AstNode::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_equality()?;
        let mut chain = 0;

        while self.match_token(&Token::AndAnd(self.current_location())) {
            let loc = self.previous_location();
            chain += 1;
            self.check_nesting(chain)?;
            let right = Box::new(self.parse_equality()?);
            left = AstNode::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse equality (== != === !==)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_relational()?;
        let mut chain = 0;

        loop {
            let op = match self.peek() {
                Token::EqEq(_) => BinOp::Eq,
                Token::NotEq(_) => BinOp::Ne,
                Token::EqEqEq(_) => BinOp::StrictEq,
                Token::NotEqEq(_) => BinOp::StrictNe,
                _ => break,
            };
            let loc = self.advance().location();
            chain += 1;
            self.check_nesting(chain)?;
            let right = Box::new(self.parse_relational()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;
        let mut chain = 0;

        loop {
            let op = match self.peek() {
                Token::Lt(_) => BinOp::Lt,
                Token::Le(_) => BinOp::Le,
                Token::Gt(_) => BinOp::Gt,
                Token::Ge(_) => BinOp::Ge,
                _ => break,
            };
            let loc = self.advance().location();
            chain += 1;
            self.check_nesting(chain)?;
            let right = Box::new(self.parse_additive()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;
        let mut chain = 0;

        loop {
            let op = match self.peek() {
                Token::Plus(_) => BinOp::Add,
                Token::Minus(_) => BinOp::Sub,
                _ => break,
            };
            let loc = self.advance().location();
            chain += 1;
            self.check_nesting(chain)?;
            let right = Box::new(self.parse_multiplicative()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;
        let mut chain = 0;

        loop {
            let op = match self.peek() {
                Token::Star(_) => BinOp::Mul,
                Token::Slash(_) => BinOp::Div,
                Token::Percent(_) => BinOp::Mod,
                _ => break,
            };
            let loc = self.advance().location();
            chain += 1;
            self.check_nesting(chain)?;
            let right = Box::new(self.parse_unary()?);
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary (! - + typeof)
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let op = match self.peek() {
            Token::Bang(_) => UnaryOp::Not,
            Token::Minus(_) => UnaryOp::Neg,
            Token::Plus(_) => UnaryOp::Plus,
            Token::TypeOf(_) => UnaryOp::TypeOf,
            _ => return self.parse_postfix(),
        };
        let loc = self.advance().location();
        let operand = Box::new(self.nested(Self::parse_unary)?);

        Ok(AstNode::UnaryOp {
            op,
            operand,
            location: loc,
        })
    }

    /// Parse postfix: calls `f(a, b)` and member access `a.b`
    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;
        let mut chain = 0;

        loop {
            if self.match_token(&Token::LParen(self.current_location())) {
                let loc = self.previous_location();
                chain += 1;
                self.check_nesting(chain)?;
                let args = self.parse_argument_list()?;
                self.expect_rparen("after arguments")?;
                expr = AstNode::Call {
                    callee: Box::new(expr),
                    args,
                    location: loc,
                };
            } else if self.match_token(&Token::Dot(self.current_location())) {
                let loc = self.previous_location();
                chain += 1;
                self.check_nesting(chain)?;
                let property = self.expect_identifier()?;
                expr = AstNode::MemberAccess {
                    object: Box::new(expr),
                    property,
                    location: loc,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse comma-separated call arguments (parentheses handled by caller)
    fn parse_argument_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary: literals, identifiers, parenthesized expressions
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.peek_token();
        let loc = token.location();

        let node = match token {
            Token::NumberLiteral(n, _) => AstNode::NumberLiteral(n, loc),
            Token::StringLiteral(s, _) => AstNode::StringLiteral(s, loc),
            Token::True(_) => AstNode::BoolLiteral(true, loc),
            Token::False(_) => AstNode::BoolLiteral(false, loc),
            Token::Null(_) => AstNode::NullLiteral(loc),
            Token::Undefined(_) => AstNode::UndefinedLiteral(loc),
            Token::Ident(name, _) => AstNode::Variable(name, loc),
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after expression")?;
                return Ok(expr);
            }
            _ => return Err(self.error_here("Expected expression")),
        };

        self.advance();
        Ok(node)
    }
}
