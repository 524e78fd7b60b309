//! Console script parser
//!
//! This module transforms snippet text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Supported Script Subset
//!
//! A small JavaScript-flavoured language, enough for console snippets:
//! - Values: numbers, strings, booleans, `null`, `undefined`
//! - Statements: `let`/`const`/`var`, `if`/`else`, `while`, `return`, blocks
//! - Expressions: arithmetic, comparison (loose and strict), logical,
//!   ternary, assignment, calls and member access
//! - Semicolons may be omitted before `}`, at a line break and at the end of input
//! - Nesting deeper than [`MAX_NESTING_DEPTH`] is a syntax error
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{ParseError, Parser, MAX_NESTING_DEPTH};
