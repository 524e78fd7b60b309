//! Error types for script evaluation
//!
//! [`RuntimeError`] covers failures while executing a parsed snippet;
//! [`ScriptError`] unifies it with [`ParseError`] so a whole evaluation can
//! be driven with `?`.
//!
//! Messages carry the JavaScript error class name (`ReferenceError`,
//! `TypeError`, ...) because they are shown verbatim in the console log.

use crate::parser::ast::SourceLocation;
use crate::parser::ParseError;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read or assignment of an undeclared name
    #[error("ReferenceError: {name} is not defined (line {})", .location.line)]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Assignment to a `const` binding
    #[error("TypeError: Assignment to constant variable '{name}' (line {})", .location.line)]
    ConstAssignment {
        name: String,
        location: SourceLocation,
    },

    /// `let`/`const` declared twice in the same block
    #[error("SyntaxError: Identifier '{name}' has already been declared (line {})", .location.line)]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Callee is not a function
    #[error("TypeError: {name} is not a function (line {})", .location.line)]
    NotCallable {
        name: String,
        location: SourceLocation,
    },

    /// Builtin called with too few arguments
    #[error(
        "TypeError: {function} expects {expected} argument{}, got {got} (line {})",
        plural(.expected),
        .location.line
    )]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Operation not supported for the given value
    #[error("TypeError: {message} (line {})", .location.line)]
    UnsupportedOperation {
        message: String,
        location: SourceLocation,
    },

    /// Too many statements or loop iterations in one evaluation
    #[error("RangeError: step limit of {limit} exceeded (line {})", .location.line)]
    StepLimitExceeded {
        limit: usize,
        location: SourceLocation,
    },

    /// Expression or block recursion deeper than the interpreter allows
    #[error("RangeError: maximum nesting depth of {limit} exceeded (line {})", .location.line)]
    NestingTooDeep {
        limit: usize,
        location: SourceLocation,
    },
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::ConstAssignment { location, .. }
            | RuntimeError::Redeclaration { location, .. }
            | RuntimeError::NotCallable { location, .. }
            | RuntimeError::ArgumentCountMismatch { location, .. }
            | RuntimeError::UnsupportedOperation { location, .. }
            | RuntimeError::StepLimitExceeded { location, .. }
            | RuntimeError::NestingTooDeep { location, .. } => *location,
        }
    }
}

/// Any failure while evaluating a snippet
#[derive(Debug, Clone, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ScriptError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ScriptError::Parse(e) => e.location,
            ScriptError::Runtime(e) => e.location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_count_plural() {
        let err = RuntimeError::ArgumentCountMismatch {
            function: "Math.pow".to_string(),
            expected: 2,
            got: 1,
            location: SourceLocation::new(3, 1),
        };
        assert_eq!(
            err.to_string(),
            "TypeError: Math.pow expects 2 arguments, got 1 (line 3)"
        );
    }

    #[test]
    fn test_script_error_is_transparent() {
        let err: ScriptError = RuntimeError::UndefinedVariable {
            name: "x".to_string(),
            location: SourceLocation::new(1, 8),
        }
        .into();
        assert_eq!(err.to_string(), "ReferenceError: x is not defined (line 1)");
        assert_eq!(err.location(), SourceLocation::new(1, 8));
    }
}
