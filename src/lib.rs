//! # Introduction
//!
//! QuikConsole is a script console for the terminal. Snippets typed into an
//! input area are evaluated and their results appended to a running log;
//! earlier snippets can be recalled the way a shell recalls history. The UI
//! is built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Input → Lexer → Parser → AST → Interpreter → log entry → TUI
//! ```
//!
//! 1. [`console`]: the widget state (`SourceCode`, `CodeHistory`,
//!    `ScriptEvaluation`) and its `run` / `clear` / `previous` / `next`
//!    operations, generic over an [`console::Evaluator`].
//! 2. [`parser`]: tokenises a snippet and builds an AST.
//! 3. [`interpreter`]: walks the AST with implicit-return semantics and
//!    captures `console.log` output; [`interpreter::ScriptEngine`] is the
//!    default evaluator.
//! 4. [`config`] and [`logging`]: command-line flags and `tracing` setup.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported script subset
//!
//! Values: numbers, strings, booleans, `null`, `undefined`.
//! Statements: `let` / `const` / `var`, `if/else`, `while`, `return`, blocks.
//! Built-ins: `console.log` and friends, `Math.*`, `String`, `Number`,
//! `Boolean`, `parseInt`, `parseFloat`, `isNaN`, a few string methods.

pub mod config;
pub mod console;
pub mod interpreter;
pub mod logging;
pub mod parser;
pub mod ui;

pub use console::{Console, EvaluationOutcome, Evaluator};
