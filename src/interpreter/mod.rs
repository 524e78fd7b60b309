//! Script execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`ScriptEngine`] and the AST-walking [`engine::Interpreter`]
//! - [`value`]: runtime values and their JavaScript-style coercions
//! - [`scope`]: block-scoped variable bindings
//! - [`output`]: captured `console.log` lines
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! Every snippet is parsed and run by a fresh interpreter, so no bindings
//! survive from one run to the next. A step counter bounds runaway loops.
//!
//! # Built-in Functions
//!
//! Built-ins (`console.*`, `Math.*`, conversions, string methods) are
//! resolved by name in `builtins` rather than stored as values.

mod builtins;
pub mod engine;
pub mod errors;
pub mod output;
pub mod scope;
pub mod value;

pub use engine::{Execution, ScriptEngine, DEFAULT_STEP_LIMIT, MAX_EVAL_DEPTH};
pub use errors::{RuntimeError, ScriptError};
pub use value::Value;
