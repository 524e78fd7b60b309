// Integration tests for the script engine

use quikconsole::interpreter::{RuntimeError, ScriptEngine, ScriptError, Value};
use quikconsole::{Console, EvaluationOutcome, Evaluator};

fn value(source: &str) -> Value {
    let execution = ScriptEngine::new().execute(source);
    match execution.result {
        Ok(value) => value,
        Err(e) => panic!("Execution failed for {:?}: {}", source, e),
    }
}

fn text(source: &str) -> String {
    match ScriptEngine::new().evaluate(source) {
        EvaluationOutcome::Value(text) => text,
        EvaluationOutcome::Error(e) => panic!("Unexpected error for {:?}: {}", source, e),
    }
}

fn error(source: &str) -> String {
    match ScriptEngine::new().evaluate(source) {
        EvaluationOutcome::Error(e) => e,
        EvaluationOutcome::Value(v) => panic!("Expected error for {:?}, got {}", source, v),
    }
}

#[test]
fn test_arithmetic_and_precedence() {
    assert_eq!(value("1 + 2 * 3"), Value::Number(7.0));
    assert_eq!(value("(1 + 2) * 3"), Value::Number(9.0));
    assert_eq!(value("7 % 4 - -1"), Value::Number(4.0));
    assert_eq!(text("0.1 + 0.2"), "0.30000000000000004");
    assert_eq!(text("1 / 0"), "Infinity");
    assert_eq!(text("0 / 0"), "NaN");
}

#[test]
fn test_string_coercions() {
    assert_eq!(text("'a' + 1 + 2"), "a12");
    assert_eq!(text("1 + 2 + 'a'"), "3a");
    assert_eq!(text("'6' * '7'"), "42");
    assert_eq!(text("'abc'.length"), "3");
    assert_eq!(text("'  Hi '.trim().toUpperCase()"), "HI");
    assert_eq!(text("'console'.includes('sol')"), "true");
}

#[test]
fn test_string_comparison_uses_utf16_order() {
    assert_eq!(text("'apple' < 'banana'"), "true");
    assert_eq!(text("'\u{10000}' < '\u{E000}'"), "true");
    assert_eq!(text("'\u{10000}'.length"), "2");
}

#[test]
fn test_equality() {
    assert_eq!(text("1 == '1'"), "true");
    assert_eq!(text("1 === '1'"), "false");
    assert_eq!(text("null == undefined"), "true");
    assert_eq!(text("null === undefined"), "false");
    assert_eq!(text("NaN == NaN"), "false");
}

#[test]
fn test_logical_operators_short_circuit() {
    assert_eq!(text("0 || 'fallback'"), "fallback");
    assert_eq!(text("'' && missing"), "");
    assert_eq!(text("true ? 'yes' : 'no'"), "yes");
}

#[test]
fn test_typeof() {
    assert_eq!(text("typeof 1"), "number");
    assert_eq!(text("typeof 'x'"), "string");
    assert_eq!(text("typeof null"), "object");
    assert_eq!(text("typeof notDeclared"), "undefined");
    assert_eq!(text("typeof Math"), "object");
    assert_eq!(text("typeof parseInt"), "function");
}

#[test]
fn test_control_flow() {
    let source = r#"
        let total = 0;
        let i = 1;
        while (i <= 10) {
            if (i % 2 === 0) {
                total += i;
            } else {
                total -= 1;
            }
            i += 1;
        }
        return total;
    "#;
    assert_eq!(value(source), Value::Number(25.0));
}

#[test]
fn test_block_scoping_and_var() {
    assert_eq!(text("let a = 1; { let a = 2; } a"), "1");
    assert_eq!(text("{ var b = 3; } b"), "3");
}

#[test]
fn test_builtins() {
    assert_eq!(text("Math.max(1, 5, 3)"), "5");
    assert_eq!(text("Math.min()"), "Infinity");
    assert_eq!(text("Math.round(2.5)"), "3");
    assert_eq!(text("Math.round(-2.5)"), "-2");
    assert_eq!(text("Math.round(0.49999999999999994)"), "0");
    assert_eq!(text("Math.round(4503599627370497)"), "4503599627370497");
    assert_eq!(text("Math.pow(2, 10)"), "1024");
    assert_eq!(text("Math.floor(Math.PI * 100)"), "314");
    assert_eq!(text("parseInt('42px')"), "42");
    assert_eq!(text("parseFloat('3.5kg')"), "3.5");
    assert_eq!(text("isNaN('abc')"), "true");
    assert_eq!(text("String(12) + Number('3')"), "123");
    assert_eq!(text("Boolean('')"), "false");
}

#[test]
fn test_console_output_order() {
    let source = r#"
        console.log("first");
        console.info("second", 2);
        console.warn(undefined, null, true);
        return "done";
    "#;
    assert_eq!(text(source), "first\nsecond 2\nundefined null true\ndone");
}

#[test]
fn test_only_output_when_value_is_undefined() {
    assert_eq!(text("console.log('x')"), "x");
    assert_eq!(text("let nothing;"), "undefined");
    assert_eq!(text("return;"), "undefined");
}

#[test]
fn test_comments_and_missing_semicolons() {
    let source = "// leading comment\nlet a = 2 /* inline */\nlet b = 3\na * b";
    assert_eq!(text(source), "6");
}

#[test]
fn test_runtime_errors() {
    assert_eq!(error("x + 1"), "ReferenceError: x is not defined (line 1)");
    assert!(error("const c = 1; c = 2;").starts_with("TypeError: Assignment to constant variable 'c'"));
    assert!(error("let a; let a;").starts_with("SyntaxError: Identifier 'a' has already been declared"));
    assert!(error("let n = 1; n()").starts_with("TypeError: n is not a function"));
    assert!(error("undefined.length").starts_with("TypeError: Cannot read properties of undefined"));
    assert!(error("Math.pow(2)").starts_with("TypeError: Math.pow expects 2 arguments, got 1"));
}

#[test]
fn test_syntax_errors() {
    assert!(error("let = 5;").starts_with("SyntaxError: "));
    assert!(error("'open").starts_with("SyntaxError: Unterminated string literal"));
    assert!(error("1 = 2").starts_with("SyntaxError: Invalid left-hand side in assignment"));
    assert!(error("const k;").starts_with("SyntaxError: Missing initializer in const declaration"));
}

#[test]
fn test_error_line_is_reported() {
    let source = "let a = 1;\nlet b = 2;\nreturn a + c;";
    assert_eq!(error(source), "ReferenceError: c is not defined (line 3)");
}

#[test]
fn test_step_limit_stops_infinite_loop() {
    let execution = ScriptEngine::with_step_limit(1_000).execute("let i = 0; while (true) { i += 1; }");
    match execution.result {
        Err(ScriptError::Runtime(RuntimeError::StepLimitExceeded { limit, .. })) => {
            assert_eq!(limit, 1_000);
        }
        other => panic!("Expected step limit error, got {:?}", other),
    }
}

#[test]
fn test_shadowing_builtins() {
    assert_eq!(text("let Math = 2; Math * 2"), "4");
    assert_eq!(text("let console = 'c'; console.length"), "1");
}

#[test]
fn test_deep_nesting_is_an_error_not_a_crash() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    match ScriptEngine::new().evaluate(&source) {
        EvaluationOutcome::Error(message) => {
            assert!(message.starts_with("SyntaxError: Maximum nesting depth exceeded"));
        }
        other => panic!("Expected error, got {:?}", other),
    }

    let blocks = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
    assert!(ScriptEngine::new().evaluate(&blocks).is_error());

    let negations = format!("return {}1;", "!".repeat(10_000));
    assert!(ScriptEngine::new().evaluate(&negations).is_error());

    let calls = format!("Math.abs{}", "(".repeat(10_000));
    assert!(ScriptEngine::new().evaluate(&calls).is_error());
}

#[test]
fn test_deeply_nested_run_is_logged_as_failure() {
    let mut console = Console::new();
    let depth = 50_000;
    console.set_source_code(format!("return {}1{};", "(".repeat(depth), ")".repeat(depth)));
    console.run();

    assert_eq!(console.code_history().len(), 1);
    assert!(console.is_failed(0));
    assert!(console.script_evaluation()[0].contains("Maximum nesting depth exceeded"));
}
