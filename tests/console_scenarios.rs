// Integration tests for the console state machine

use quikconsole::{Console, EvaluationOutcome};

const HELLO: &str = r#"return "Hello World!";"#;
const ROCKS: &str = r#"console.log("QuikConsole rocks!");"#;

#[test]
fn test_scenario_hello_world() {
    let mut console = Console::new();

    console.set_source_code(HELLO);
    assert_eq!(console.source_code(), HELLO);

    console.run();
    assert_eq!(console.code_history(), [HELLO]);
    assert_eq!(console.script_evaluation(), ["Hello World!"]);
}

#[test]
fn test_scenario_clear_then_log() {
    let mut console = Console::new();
    console.set_source_code(HELLO);
    console.run();

    console.clear();
    assert_eq!(console.source_code(), "");
    assert_eq!(console.script_evaluation().len(), 1);

    console.set_source_code(ROCKS);
    console.run();
    assert_eq!(console.code_history(), [HELLO, ROCKS]);
    assert_eq!(
        console.script_evaluation(),
        ["Hello World!", "QuikConsole rocks!"]
    );
}

#[test]
fn test_scenario_previous_then_next() {
    let mut console = Console::new();
    for snippet in [HELLO, ROCKS] {
        console.clear();
        console.set_source_code(snippet);
        console.run();
    }

    console.clear();
    console.previous();
    assert_eq!(console.source_code(), ROCKS);
    console.next();
    assert_eq!(console.source_code(), HELLO);

    // Navigation leaves both lists alone
    assert_eq!(console.code_history(), [HELLO, ROCKS]);
    assert_eq!(console.script_evaluation().len(), 2);
}

#[test]
fn test_scenario_run_on_fresh_console() {
    let mut console = Console::new();
    console.run();

    assert_eq!(console.source_code(), "");
    assert!(console.code_history().is_empty());
    assert!(console.script_evaluation().is_empty());
}

#[test]
fn test_failing_snippet_is_logged() {
    let mut console = Console::new();
    console.set_source_code("console.log('step 1'); nope();");
    console.run();

    assert_eq!(console.code_history().len(), 1);
    assert!(console.is_failed(0));
    assert_eq!(
        console.script_evaluation()[0],
        "step 1\nReferenceError: nope is not defined (line 1)"
    );
}

#[test]
fn test_runs_do_not_share_bindings() {
    let mut console = Console::new();
    console.set_source_code("let x = 1; x");
    console.run();
    console.run();

    // Same snippet twice: no redeclaration error the second time
    assert_eq!(console.script_evaluation(), ["1", "1"]);
    assert!(!console.is_failed(1));
}

#[test]
fn test_custom_evaluator() {
    let mut seen = Vec::new();
    let mut console = Console::with_evaluator(|source: &str| {
        seen.push(source.to_string());
        EvaluationOutcome::Value(source.len().to_string())
    });

    console.set_source_code("abc");
    console.run();
    console.set_source_code("   ");
    console.run();

    assert_eq!(console.script_evaluation(), ["3"]);
    drop(console);
    assert_eq!(seen, vec!["abc"]);
}
