// Execution engine for console scripts

use crate::console::{EvaluationOutcome, Evaluator};
use crate::interpreter::errors::{RuntimeError, ScriptError};
use crate::interpreter::output::OutputCapture;
use crate::interpreter::scope::Scope;
use crate::interpreter::value::Value;
use crate::parser::ast::*;
use crate::parser::Parser;

/// Default cap on executed statements plus loop iterations per evaluation
pub const DEFAULT_STEP_LIMIT: usize = 100_000;

/// Deepest statement and expression recursion one evaluation may reach
pub const MAX_EVAL_DEPTH: usize = 256;

/// How a statement finished
#[derive(Debug)]
enum Flow {
    /// Fell through; carries the value of an expression statement
    Normal(Option<Value>),
    Return(Value),
}

/// Walks one parsed snippet. A fresh interpreter is created for every run,
/// so nothing leaks from one snippet into the next.
pub struct Interpreter {
    scope: Scope,

    /// Mock console for `console.log` output
    pub(crate) terminal: OutputCapture,

    steps: usize,
    step_limit: usize,
    depth: usize,
}

impl Interpreter {
    pub fn new(step_limit: usize) -> Self {
        Interpreter {
            scope: Scope::new(),
            terminal: OutputCapture::new(),
            steps: 0,
            step_limit,
            depth: 0,
        }
    }

    /// Run a program with implicit-return semantics.
    ///
    /// An explicit `return` wins; otherwise a trailing top-level expression
    /// statement supplies the value; otherwise the result is `undefined`.
    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        let mut completion = None;

        for stmt in &program.nodes {
            match self.execute_statement(stmt)? {
                Flow::Return(value) => return Ok(value),
                Flow::Normal(value) => completion = value,
            }
        }

        Ok(completion.unwrap_or_default())
    }

    /// Output captured so far
    pub fn terminal(&self) -> &OutputCapture {
        &self.terminal
    }

    pub fn into_terminal(self) -> OutputCapture {
        self.terminal
    }

    fn tick(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(RuntimeError::StepLimitExceeded {
                limit: self.step_limit,
                location,
            });
        }
        Ok(())
    }

    fn descend(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        if self.depth >= MAX_EVAL_DEPTH {
            return Err(RuntimeError::NestingTooDeep {
                limit: MAX_EVAL_DEPTH,
                location,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn execute_statement(&mut self, stmt: &AstNode) -> Result<Flow, RuntimeError> {
        self.tick(stmt.location())?;
        self.descend(stmt.location())?;
        let flow = self.execute_node(stmt);
        self.depth -= 1;
        flow
    }

    fn execute_node(&mut self, stmt: &AstNode) -> Result<Flow, RuntimeError> {
        match stmt {
            AstNode::VarDecl {
                kind,
                name,
                init,
                location,
            } => {
                let value = match init {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::Undefined,
                };
                self.scope.declare(name, value, *kind, *location)?;
                Ok(Flow::Normal(None))
            }

            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_expr(condition)?.is_truthy() {
                    self.execute_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_block(else_branch)
                } else {
                    Ok(Flow::Normal(None))
                }
            }

            AstNode::While {
                condition,
                body,
                location,
            } => {
                while self.evaluate_expr(condition)?.is_truthy() {
                    self.tick(*location)?;
                    if let Flow::Return(value) = self.execute_block(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal(None))
            }

            AstNode::Return { expr, .. } => {
                let value = match expr {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }

            AstNode::Block { statements, .. } => match self.execute_block(statements)? {
                Flow::Return(value) => Ok(Flow::Return(value)),
                Flow::Normal(_) => Ok(Flow::Normal(None)),
            },

            AstNode::ExpressionStatement { expr, .. } => {
                let value = self.evaluate_expr(expr)?;
                Ok(Flow::Normal(Some(value)))
            }

            other => Err(RuntimeError::UnsupportedOperation {
                message: format!("{:?} is not a statement", other),
                location: other.location(),
            }),
        }
    }

    /// Execute statements in a fresh block frame
    fn execute_block(&mut self, statements: &[AstNode]) -> Result<Flow, RuntimeError> {
        self.scope.push_frame();
        let mut result = Ok(Flow::Normal(None));

        for stmt in statements {
            match self.execute_statement(stmt) {
                Ok(Flow::Normal(_)) => {}
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.scope.pop_frame();
        result
    }

    pub(crate) fn evaluate_expr(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        self.descend(expr.location())?;
        let value = self.evaluate_node(expr);
        self.depth -= 1;
        value
    }

    fn evaluate_node(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        match expr {
            AstNode::NumberLiteral(n, _) => Ok(Value::Number(*n)),
            AstNode::StringLiteral(s, _) => Ok(Value::Str(s.clone())),
            AstNode::BoolLiteral(b, _) => Ok(Value::Bool(*b)),
            AstNode::NullLiteral(_) => Ok(Value::Null),
            AstNode::UndefinedLiteral(_) => Ok(Value::Undefined),

            AstNode::Variable(name, location) => self.read_variable(name, *location),

            AstNode::BinaryOp {
                op: BinOp::And,
                left,
                right,
                ..
            } => {
                let lhs = self.evaluate_expr(left)?;
                if lhs.is_truthy() {
                    self.evaluate_expr(right)
                } else {
                    Ok(lhs)
                }
            }

            AstNode::BinaryOp {
                op: BinOp::Or,
                left,
                right,
                ..
            } => {
                let lhs = self.evaluate_expr(left)?;
                if lhs.is_truthy() {
                    Ok(lhs)
                } else {
                    self.evaluate_expr(right)
                }
            }

            AstNode::BinaryOp {
                op, left, right, ..
            } => {
                let lhs = self.evaluate_expr(left)?;
                let rhs = self.evaluate_expr(right)?;
                Ok(apply_binary_op(*op, &lhs, &rhs))
            }

            AstNode::UnaryOp {
                op: UnaryOp::TypeOf,
                operand,
                ..
            } => {
                // typeof tolerates undeclared names
                if let AstNode::Variable(name, _) = &**operand {
                    if !self.scope.contains(name) {
                        let type_name = if matches!(name.as_str(), "NaN" | "Infinity") {
                            "number"
                        } else if Self::is_namespace(name) {
                            "object"
                        } else if Self::is_global_function(name) {
                            "function"
                        } else {
                            "undefined"
                        };
                        return Ok(Value::from(type_name));
                    }
                }
                let value = self.evaluate_expr(operand)?;
                Ok(Value::from(value.type_name()))
            }

            AstNode::UnaryOp { op, operand, .. } => {
                let value = self.evaluate_expr(operand)?;
                Ok(match op {
                    UnaryOp::Neg => Value::Number(-value.to_number()),
                    UnaryOp::Plus => Value::Number(value.to_number()),
                    UnaryOp::Not => Value::Bool(!value.is_truthy()),
                    UnaryOp::TypeOf => Value::from(value.type_name()),
                })
            }

            AstNode::TernaryOp {
                condition,
                true_expr,
                false_expr,
                ..
            } => {
                if self.evaluate_expr(condition)?.is_truthy() {
                    self.evaluate_expr(true_expr)
                } else {
                    self.evaluate_expr(false_expr)
                }
            }

            AstNode::Assignment {
                name,
                rhs,
                location,
            } => {
                let value = self.evaluate_expr(rhs)?;
                self.scope.assign(name, value.clone(), *location)?;
                Ok(value)
            }

            AstNode::CompoundAssignment {
                name,
                op,
                rhs,
                location,
            } => {
                let current = self.read_variable(name, *location)?;
                let rhs = self.evaluate_expr(rhs)?;
                let value = apply_binary_op(*op, &current, &rhs);
                self.scope.assign(name, value.clone(), *location)?;
                Ok(value)
            }

            AstNode::MemberAccess {
                object,
                property,
                location,
            } => {
                if let AstNode::Variable(ns, _) = &**object {
                    if Self::is_namespace(ns) && !self.scope.contains(ns) {
                        return self.namespace_property(ns, property, *location);
                    }
                }
                let value = self.evaluate_expr(object)?;
                self.value_property(&value, property, *location)
            }

            AstNode::Call {
                callee,
                args,
                location,
            } => self.evaluate_call(callee, args, *location),

            other => Err(RuntimeError::UnsupportedOperation {
                message: "statement used where an expression was expected".to_string(),
                location: other.location(),
            }),
        }
    }

    fn read_variable(&self, name: &str, location: SourceLocation) -> Result<Value, RuntimeError> {
        if let Some(value) = self.scope.get(name) {
            return Ok(value.clone());
        }
        match name {
            "NaN" => return Ok(Value::Number(f64::NAN)),
            "Infinity" => return Ok(Value::Number(f64::INFINITY)),
            _ => {}
        }
        if Self::is_namespace(name) || Self::is_global_function(name) {
            return Err(RuntimeError::UnsupportedOperation {
                message: format!("builtin '{}' can only be called, not used as a value", name),
                location,
            });
        }
        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            location,
        })
    }

    fn evaluate_call(
        &mut self,
        callee: &AstNode,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate_expr(arg)?);
        }

        match callee {
            AstNode::MemberAccess {
                object, property, ..
            } => {
                if let AstNode::Variable(ns, _) = &**object {
                    if Self::is_namespace(ns) && !self.scope.contains(ns) {
                        return self.call_namespace(ns, property, &arg_values, location);
                    }
                }
                let receiver = self.evaluate_expr(object)?;
                match receiver {
                    Value::Str(s) => self.call_string_method(&s, property, &arg_values, location),
                    other => Err(RuntimeError::NotCallable {
                        name: format!("{}.{}", other.type_name(), property),
                        location,
                    }),
                }
            }
            AstNode::Variable(name, _) if !self.scope.contains(name) => {
                self.call_global(name, &arg_values, location)
            }
            AstNode::Variable(name, _) => Err(RuntimeError::NotCallable {
                name: name.clone(),
                location,
            }),
            _ => Err(RuntimeError::NotCallable {
                name: "expression".to_string(),
                location,
            }),
        }
    }
}

/// Binary operators other than the short-circuiting `&&` / `||`
pub(crate) fn apply_binary_op(op: BinOp, lhs: &Value, rhs: &Value) -> Value {
    match op {
        BinOp::Add => match (lhs, rhs) {
            (Value::Str(_), _) | (_, Value::Str(_)) => {
                Value::Str(format!("{}{}", lhs.to_display_string(), rhs.to_display_string()))
            }
            _ => Value::Number(lhs.to_number() + rhs.to_number()),
        },
        BinOp::Sub => Value::Number(lhs.to_number() - rhs.to_number()),
        BinOp::Mul => Value::Number(lhs.to_number() * rhs.to_number()),
        BinOp::Div => Value::Number(lhs.to_number() / rhs.to_number()),
        BinOp::Mod => Value::Number(lhs.to_number() % rhs.to_number()),
        BinOp::Eq => Value::Bool(lhs.loose_eq(rhs)),
        BinOp::Ne => Value::Bool(!lhs.loose_eq(rhs)),
        BinOp::StrictEq => Value::Bool(lhs.strict_eq(rhs)),
        BinOp::StrictNe => Value::Bool(!lhs.strict_eq(rhs)),
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => Value::Bool(compare(op, lhs, rhs)),
        BinOp::And => {
            if lhs.is_truthy() {
                rhs.clone()
            } else {
                lhs.clone()
            }
        }
        BinOp::Or => {
            if lhs.is_truthy() {
                lhs.clone()
            } else {
                rhs.clone()
            }
        }
    }
}

/// Relational comparison: strings compare by UTF-16 code units, everything
/// else numerically (NaN compares false)
fn compare(op: BinOp, lhs: &Value, rhs: &Value) -> bool {
    if let (Value::Str(a), Value::Str(b)) = (lhs, rhs) {
        let order = a.encode_utf16().cmp(b.encode_utf16());
        return match op {
            BinOp::Lt => order.is_lt(),
            BinOp::Le => order.is_le(),
            BinOp::Gt => order.is_gt(),
            _ => order.is_ge(),
        };
    }

    let (a, b) = (lhs.to_number(), rhs.to_number());
    match op {
        BinOp::Lt => a < b,
        BinOp::Le => a <= b,
        BinOp::Gt => a > b,
        _ => a >= b,
    }
}

/// Result of evaluating one snippet: captured output plus value or error
#[derive(Debug)]
pub struct Execution {
    pub output: OutputCapture,
    pub result: Result<Value, ScriptError>,
}

impl Execution {
    /// Log text: emitted lines first, then the value (unless `undefined`)
    /// or the error message
    pub fn to_outcome(&self) -> EvaluationOutcome {
        let mut lines = self.output.get_output();

        match &self.result {
            Ok(value) => {
                if *value != Value::Undefined || lines.is_empty() {
                    lines.push(value.to_display_string());
                }
                EvaluationOutcome::Value(lines.join("\n"))
            }
            Err(err) => {
                lines.push(err.to_string());
                EvaluationOutcome::Error(lines.join("\n"))
            }
        }
    }
}

/// The console's built-in [`Evaluator`]: parses and runs each snippet with
/// a fresh [`Interpreter`].
#[derive(Debug, Clone)]
pub struct ScriptEngine {
    step_limit: usize,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::with_step_limit(DEFAULT_STEP_LIMIT)
    }

    pub fn with_step_limit(step_limit: usize) -> Self {
        ScriptEngine { step_limit }
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    /// Parse and run `source`, keeping whatever output was produced even
    /// when execution fails part-way
    pub fn execute(&self, source: &str) -> Execution {
        let program = match Parser::new(source).and_then(|mut parser| parser.parse_program()) {
            Ok(program) => program,
            Err(err) => {
                return Execution {
                    output: OutputCapture::new(),
                    result: Err(err.into()),
                };
            }
        };

        let mut interpreter = Interpreter::new(self.step_limit);
        let result = interpreter.run(&program).map_err(ScriptError::from);

        Execution {
            output: interpreter.into_terminal(),
            result,
        }
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for ScriptEngine {
    fn evaluate(&mut self, source: &str) -> EvaluationOutcome {
        let execution = self.execute(source);
        if let Err(err) = &execution.result {
            let location = err.location();
            tracing::debug!(
                line = location.line,
                column = location.column,
                error = %err,
                "script evaluation failed"
            );
        }
        execution.to_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(source: &str) -> EvaluationOutcome {
        ScriptEngine::new().evaluate(source)
    }

    #[test]
    fn test_explicit_return() {
        assert_eq!(
            outcome(r#"return "Hello World!";"#),
            EvaluationOutcome::Value("Hello World!".to_string())
        );
    }

    #[test]
    fn test_console_log_is_captured() {
        assert_eq!(
            outcome(r#"console.log("QuikConsole rocks!");"#),
            EvaluationOutcome::Value("QuikConsole rocks!".to_string())
        );
    }

    #[test]
    fn test_trailing_expression_is_implicit_return() {
        assert_eq!(outcome("let x = 2; x * 21"), EvaluationOutcome::Value("42".to_string()));
    }

    #[test]
    fn test_no_value_prints_undefined() {
        assert_eq!(outcome("let x = 1;"), EvaluationOutcome::Value("undefined".to_string()));
    }

    #[test]
    fn test_output_then_return_value() {
        assert_eq!(
            outcome("console.log('a'); console.log('b', 1); return 3;"),
            EvaluationOutcome::Value("a\nb 1\n3".to_string())
        );
    }

    #[test]
    fn test_return_inside_loop() {
        let source = "let i = 0; while (true) { i += 1; if (i === 5) { return i; } }";
        assert_eq!(outcome(source), EvaluationOutcome::Value("5".to_string()));
    }

    #[test]
    fn test_error_keeps_earlier_output() {
        assert_eq!(
            outcome("console.log('before'); missing + 1;"),
            EvaluationOutcome::Error(
                "before\nReferenceError: missing is not defined (line 1)".to_string()
            )
        );
    }

    #[test]
    fn test_parse_error_outcome() {
        match outcome("return (1;") {
            EvaluationOutcome::Error(message) => {
                assert!(message.starts_with("SyntaxError: Expected ')' after expression"));
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_step_limit() {
        let engine = ScriptEngine::with_step_limit(50);
        let execution = engine.execute("while (true) {}");
        assert!(matches!(
            execution.result,
            Err(ScriptError::Runtime(RuntimeError::StepLimitExceeded { limit: 50, .. }))
        ));
    }

    #[test]
    fn test_deep_expression_is_range_error() {
        let mut source = "1".to_string();
        for _ in 0..10 {
            source = format!("({source}{})", " + 1".repeat(40));
        }

        let execution = ScriptEngine::new().execute(&source);
        assert!(matches!(
            execution.result,
            Err(ScriptError::Runtime(RuntimeError::NestingTooDeep {
                limit: MAX_EVAL_DEPTH,
                ..
            }))
        ));
    }

    #[test]
    fn test_nesting_within_limits_evaluates() {
        let source = format!("{}1{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(outcome(&source), EvaluationOutcome::Value("1".to_string()));
    }

    #[test]
    fn test_block_scope_does_not_leak() {
        match outcome("{ let inner = 1; } inner") {
            EvaluationOutcome::Error(message) => {
                assert!(message.starts_with("ReferenceError: inner is not defined"));
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }
}
