// Captured console output for a single evaluation

use crate::parser::ast::SourceLocation;

/// Stand-in for the browser console: collects `console.log` lines
#[derive(Debug, Clone, Default)]
pub struct OutputCapture {
    pub lines: Vec<OutputLine>,
}

impl OutputCapture {
    pub fn new() -> Self {
        OutputCapture { lines: Vec::new() }
    }

    /// Record one console call
    pub fn print(&mut self, text: String, location: SourceLocation) {
        self.lines.push(OutputLine { text, location });
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get all lines as a vector of strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|line| line.text.split('\n').map(str::to_string))
            .collect()
    }
}

/// A line of console output with the location of the call that produced it
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub text: String,
    pub location: SourceLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_text_is_split() {
        let mut out = OutputCapture::new();
        out.print("a\nb".to_string(), SourceLocation::new(1, 1));
        out.print("c".to_string(), SourceLocation::new(2, 1));
        assert_eq!(out.get_output(), vec!["a", "b", "c"]);
    }
}
