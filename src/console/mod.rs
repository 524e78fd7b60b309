//! Console state and operations
//!
//! [`Console`] owns the three pieces of state the widget shows:
//! - `source_code`: the input buffer being edited
//! - `code_history`: every snippet that was run, oldest first
//! - `script_evaluation`: the display text for each entry of `code_history`
//!
//! The two lists are append-only and always the same length. Clearing only
//! empties the input buffer; history navigation only copies entries back
//! into it.

pub mod evaluator;
pub mod history;

pub use evaluator::{EvaluationOutcome, Evaluator};
pub use history::HistoryCursor;

use crate::interpreter::ScriptEngine;
use rustc_hash::FxHashSet;

/// Script console: input buffer, history and evaluation log
#[derive(Debug)]
pub struct Console<E: Evaluator = ScriptEngine> {
    evaluator: E,
    source_code: String,
    code_history: Vec<String>,
    script_evaluation: Vec<String>,

    /// Indices into `script_evaluation` whose run failed
    failed_runs: FxHashSet<usize>,

    cursor: HistoryCursor,
}

impl Console<ScriptEngine> {
    pub fn new() -> Self {
        Self::with_evaluator(ScriptEngine::new())
    }
}

impl Default for Console<ScriptEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> Console<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Console {
            evaluator,
            source_code: String::new(),
            code_history: Vec::new(),
            script_evaluation: Vec::new(),
            failed_runs: FxHashSet::default(),
            cursor: HistoryCursor::new(),
        }
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    /// Replace the input buffer. The history cursor is left alone so that
    /// editing a recalled snippet does not lose the recall position.
    pub fn set_source_code(&mut self, source: impl Into<String>) {
        self.source_code = source.into();
    }

    /// Mutable access for in-place editing from the input pane
    pub fn source_code_mut(&mut self) -> &mut String {
        &mut self.source_code
    }

    pub fn code_history(&self) -> &[String] {
        &self.code_history
    }

    pub fn script_evaluation(&self) -> &[String] {
        &self.script_evaluation
    }

    /// Whether the run at `index` ended in an error
    pub fn is_failed(&self, index: usize) -> bool {
        self.failed_runs.contains(&index)
    }

    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Number of entries in the log
    pub fn len(&self) -> usize {
        self.code_history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_history.is_empty()
    }

    /// Evaluate the input buffer and append it and its result to the log.
    ///
    /// Blank input is skipped entirely. A failing evaluation is logged like
    /// any other result. The input buffer is left as it was.
    pub fn run(&mut self) {
        if self.source_code.trim().is_empty() {
            tracing::debug!("run skipped: input is blank");
            return;
        }

        let outcome = self.evaluator.evaluate(&self.source_code);
        let index = self.code_history.len();
        let failed = outcome.is_error();

        self.code_history.push(self.source_code.clone());
        self.script_evaluation.push(outcome.into_text());
        if failed {
            self.failed_runs.insert(index);
        }
        self.cursor.reset();

        debug_assert_eq!(self.code_history.len(), self.script_evaluation.len());
        tracing::info!(entry = index, failed, "snippet evaluated");
    }

    /// Empty the input buffer. History and log are kept.
    pub fn clear(&mut self) {
        self.source_code.clear();
        self.cursor.reset();
        tracing::debug!("input cleared");
    }

    /// Copy the entry at the cursor into the input buffer and step toward
    /// older entries. Returns the index that was recalled.
    pub fn previous(&mut self) -> Option<usize> {
        let index = self.cursor.step_back(self.code_history.len())?;
        self.recall(index);
        Some(index)
    }

    /// Copy the entry at the cursor into the input buffer and step toward
    /// newer entries. Does nothing until `previous` has set the cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<usize> {
        let index = self.cursor.step_forward(self.code_history.len())?;
        self.recall(index);
        Some(index)
    }

    fn recall(&mut self, index: usize) {
        if let Some(snippet) = self.code_history.get(index) {
            self.source_code.clone_from(snippet);
            tracing::debug!(entry = index, cursor = ?self.cursor.position(), "history recalled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = r#"return "Hello World!";"#;
    const ROCKS: &str = r#"console.log("QuikConsole rocks!");"#;

    fn echo(source: &str) -> EvaluationOutcome {
        if source.contains("fail") {
            EvaluationOutcome::Error(format!("Error: {}", source))
        } else {
            EvaluationOutcome::Value(format!("=> {}", source))
        }
    }

    fn echo_console() -> Console<fn(&str) -> EvaluationOutcome> {
        Console::with_evaluator(echo as fn(&str) -> EvaluationOutcome)
    }

    #[test]
    fn test_fresh_console_is_empty() {
        let console = Console::new();
        assert_eq!(console.source_code(), "");
        assert!(console.code_history().is_empty());
        assert!(console.script_evaluation().is_empty());
        assert!(console.cursor().is_unset());
    }

    #[test]
    fn test_run_appends_to_both_lists() {
        let mut console = echo_console();
        console.set_source_code("a");
        console.run();
        assert_eq!(console.code_history(), ["a"]);
        assert_eq!(console.script_evaluation(), ["=> a"]);
        assert_eq!(console.source_code(), "a");
    }

    #[test]
    fn test_blank_run_is_noop() {
        let mut console = echo_console();
        console.run();
        console.set_source_code("  \n\t ");
        console.run();
        assert!(console.is_empty());
        assert!(console.script_evaluation().is_empty());
        assert_eq!(console.source_code(), "  \n\t ");
    }

    #[test]
    fn test_failed_run_is_logged_and_flagged() {
        let mut console = echo_console();
        console.set_source_code("ok");
        console.run();
        console.set_source_code("fail");
        console.run();
        assert_eq!(console.script_evaluation(), ["=> ok", "Error: fail"]);
        assert!(!console.is_failed(0));
        assert!(console.is_failed(1));
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut console = echo_console();
        console.set_source_code("a");
        console.run();
        console.clear();
        assert_eq!(console.source_code(), "");
        assert_eq!(console.len(), 1);
        assert_eq!(console.script_evaluation().len(), 1);
    }

    #[test]
    fn test_navigation_on_empty_history_is_noop() {
        let mut console = echo_console();
        console.set_source_code("draft");
        assert_eq!(console.previous(), None);
        assert_eq!(console.next(), None);
        assert_eq!(console.source_code(), "draft");
    }

    #[test]
    fn test_scenarios_with_real_engine() {
        let mut console = Console::new();

        console.set_source_code(HELLO);
        console.run();
        assert_eq!(console.code_history(), [HELLO]);
        assert_eq!(console.script_evaluation(), ["Hello World!"]);

        console.clear();
        console.set_source_code(ROCKS);
        console.run();
        assert_eq!(console.code_history(), [HELLO, ROCKS]);
        assert_eq!(console.script_evaluation(), ["Hello World!", "QuikConsole rocks!"]);

        console.clear();
        assert_eq!(console.previous(), Some(1));
        assert_eq!(console.source_code(), ROCKS);
        assert_eq!(console.next(), Some(0));
        assert_eq!(console.source_code(), HELLO);
        assert_eq!(console.len(), 2);
    }

    #[test]
    fn test_run_resets_cursor() {
        let mut console = echo_console();
        for snippet in ["a", "b", "c"] {
            console.set_source_code(snippet);
            console.run();
        }
        console.previous();
        console.previous();
        assert_eq!(console.source_code(), "b");

        console.set_source_code("d");
        console.run();
        console.previous();
        assert_eq!(console.source_code(), "d");
    }

    #[test]
    fn test_navigation_does_not_touch_lists() {
        let mut console = echo_console();
        for snippet in ["a", "b"] {
            console.set_source_code(snippet);
            console.run();
        }
        for _ in 0..5 {
            console.previous();
        }
        assert_eq!(console.source_code(), "a");
        for _ in 0..5 {
            console.next();
        }
        assert_eq!(console.source_code(), "b");
        assert_eq!(console.code_history(), ["a", "b"]);
        assert_eq!(console.script_evaluation(), ["=> a", "=> b"]);
    }
}
