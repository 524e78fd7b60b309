//! The seam between the console and whatever runs its snippets

/// Display text for one evaluated snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// Emitted output followed by the returned value
    Value(String),
    /// Emitted output followed by the error message
    Error(String),
}

impl EvaluationOutcome {
    pub fn text(&self) -> &str {
        match self {
            EvaluationOutcome::Value(text) | EvaluationOutcome::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EvaluationOutcome::Error(_))
    }

    pub fn into_text(self) -> String {
        match self {
            EvaluationOutcome::Value(text) | EvaluationOutcome::Error(text) => text,
        }
    }
}

/// Runs a snippet with implicit-return semantics.
///
/// Implementations never fail outward: errors are folded into
/// [`EvaluationOutcome::Error`] so the console can log them like any other
/// result.
pub trait Evaluator {
    fn evaluate(&mut self, source: &str) -> EvaluationOutcome;
}

impl<F> Evaluator for F
where
    F: FnMut(&str) -> EvaluationOutcome,
{
    fn evaluate(&mut self, source: &str) -> EvaluationOutcome {
        self(source)
    }
}
