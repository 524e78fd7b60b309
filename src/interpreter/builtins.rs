//! Built-in function implementations
//!
//! Builtins are resolved by name at the call site rather than stored as
//! values, so a user binding with the same name shadows them.
//!
//! # Supported Built-ins
//!
//! - `console.log/info/warn/error/debug(...)`: append a line to the captured output
//! - `Math.abs/floor/ceil/round/sqrt/min/max/pow`, `Math.PI`
//! - `String(x)`, `Number(x)`, `Boolean(x)`, `parseInt(s)`, `parseFloat(s)`, `isNaN(x)`
//! - strings: `.length`, `.toUpperCase()`, `.toLowerCase()`, `.trim()`, `.includes(s)`
//!
//! All built-ins are implemented as methods on the [`Interpreter`] struct.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::value::Value;
use crate::parser::ast::SourceLocation;

const NAMESPACES: &[&str] = &["console", "Math"];
const GLOBAL_FUNCTIONS: &[&str] = &["String", "Number", "Boolean", "parseInt", "parseFloat", "isNaN"];

impl Interpreter {
    pub(crate) fn is_namespace(name: &str) -> bool {
        NAMESPACES.contains(&name)
    }

    pub(crate) fn is_global_function(name: &str) -> bool {
        GLOBAL_FUNCTIONS.contains(&name)
    }

    /// `ns.method(args)` for `console` and `Math`
    pub(crate) fn call_namespace(
        &mut self,
        ns: &str,
        method: &str,
        args: &[Value],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (ns, method) {
            ("console", "log" | "info" | "warn" | "error" | "debug") => {
                let text = args
                    .iter()
                    .map(Value::to_display_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.terminal.print(text, location);
                Ok(Value::Undefined)
            }
            ("Math", "abs") => unary_math(args, f64::abs),
            ("Math", "floor") => unary_math(args, f64::floor),
            ("Math", "ceil") => unary_math(args, f64::ceil),
            ("Math", "round") => unary_math(args, round_half_up),
            ("Math", "sqrt") => unary_math(args, f64::sqrt),
            ("Math", "pow") => {
                expect_args("Math.pow", args, 2, location)?;
                Ok(Value::Number(args[0].to_number().powf(args[1].to_number())))
            }
            ("Math", "min") => Ok(Value::Number(fold_numbers(args, f64::INFINITY, f64::min))),
            ("Math", "max") => Ok(Value::Number(fold_numbers(args, f64::NEG_INFINITY, f64::max))),
            _ => Err(RuntimeError::NotCallable {
                name: format!("{}.{}", ns, method),
                location,
            }),
        }
    }

    /// `ns.property` for `console` and `Math`
    pub(crate) fn namespace_property(
        &self,
        ns: &str,
        property: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (ns, property) {
            ("Math", "PI") => Ok(Value::Number(std::f64::consts::PI)),
            ("Math", "E") => Ok(Value::Number(std::f64::consts::E)),
            _ => Err(RuntimeError::UnsupportedOperation {
                message: format!("{}.{} can only be called, not read", ns, property),
                location,
            }),
        }
    }

    /// Property read on a runtime value
    pub(crate) fn value_property(
        &self,
        value: &Value,
        property: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match (value, property) {
            // length counts UTF-16 code units, like JavaScript
            (Value::Str(s), "length") => Ok(Value::Number(s.encode_utf16().count() as f64)),
            (Value::Undefined | Value::Null, _) => Err(RuntimeError::UnsupportedOperation {
                message: format!(
                    "Cannot read properties of {} (reading '{}')",
                    value.to_display_string(),
                    property
                ),
                location,
            }),
            _ => Ok(Value::Undefined),
        }
    }

    pub(crate) fn call_string_method(
        &self,
        s: &str,
        method: &str,
        args: &[Value],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match method {
            "toUpperCase" => Ok(Value::from(s.to_uppercase())),
            "toLowerCase" => Ok(Value::from(s.to_lowercase())),
            "trim" => Ok(Value::from(s.trim())),
            "includes" => {
                expect_args("String.prototype.includes", args, 1, location)?;
                let needle = args[0].to_display_string();
                Ok(Value::Bool(s.contains(needle.as_str())))
            }
            _ => Err(RuntimeError::NotCallable {
                name: format!("string.{}", method),
                location,
            }),
        }
    }

    /// Free functions: `String`, `Number`, `Boolean`, `parseInt`, `parseFloat`, `isNaN`
    pub(crate) fn call_global(
        &self,
        name: &str,
        args: &[Value],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let first = args.first().cloned().unwrap_or_default();

        match name {
            "String" if args.is_empty() => Ok(Value::from("")),
            "String" => Ok(Value::from(first.to_display_string())),
            "Number" if args.is_empty() => Ok(Value::Number(0.0)),
            "Number" => Ok(Value::Number(first.to_number())),
            "Boolean" => Ok(Value::Bool(first.is_truthy())),
            "parseInt" => Ok(Value::Number(parse_int_prefix(&first.to_display_string()))),
            "parseFloat" => Ok(Value::Number(parse_float_prefix(&first.to_display_string()))),
            "isNaN" => Ok(Value::Bool(first.to_number().is_nan())),
            _ => Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            }),
        }
    }
}

fn expect_args(
    function: &str,
    args: &[Value],
    expected: usize,
    location: SourceLocation,
) -> Result<(), RuntimeError> {
    if args.len() < expected {
        return Err(RuntimeError::ArgumentCountMismatch {
            function: function.to_string(),
            expected,
            got: args.len(),
            location,
        });
    }
    Ok(())
}

/// Missing argument behaves like `undefined`, which yields NaN
/// Ties round toward +Infinity
fn round_half_up(x: f64) -> f64 {
    let rounded = x.round();
    if x - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

fn unary_math(args: &[Value], f: impl Fn(f64) -> f64) -> Result<Value, RuntimeError> {
    let x = args.first().map(Value::to_number).unwrap_or(f64::NAN);
    Ok(Value::Number(f(x)))
}

fn fold_numbers(args: &[Value], init: f64, f: fn(f64, f64) -> f64) -> f64 {
    let mut acc = init;
    for arg in args {
        let n = arg.to_number();
        if n.is_nan() {
            return f64::NAN;
        }
        acc = f(acc, n);
    }
    acc
}

/// Leading optional sign followed by decimal digits
fn parse_int_prefix(s: &str) -> f64 {
    let trimmed = s.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<f64>() {
        Ok(n) => sign * n,
        Err(_) => f64::NAN,
    }
}

/// Longest prefix that reads as a decimal number
fn parse_float_prefix(s: &str) -> f64 {
    let trimmed = s.trim_start();
    let candidate: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .collect();

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497.0);
        assert!(round_half_up(f64::NAN).is_nan());
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("  42px"), 42.0);
        assert_eq!(parse_int_prefix("-7.9"), -7.0);
        assert!(parse_int_prefix("px").is_nan());
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("3.14abc"), 3.14);
        assert_eq!(parse_float_prefix("1e3"), 1000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert!(parse_float_prefix("abc").is_nan());
    }

    #[test]
    fn test_fold_numbers_propagates_nan() {
        let args = [Value::Number(1.0), Value::from("x")];
        assert!(fold_numbers(&args, f64::INFINITY, f64::min).is_nan());
        assert_eq!(fold_numbers(&[], f64::NEG_INFINITY, f64::max), f64::NEG_INFINITY);
    }
}
