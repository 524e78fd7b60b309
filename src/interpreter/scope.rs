//! Block-scoped variable bindings
//!
//! A [`Scope`] is a stack of frames. `let` and `const` bind in the innermost
//! frame; `var` binds in the outermost (script-level) frame, mirroring
//! function scoping for a snippet that is evaluated as one function body.

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::value::Value;
use crate::parser::ast::{DeclKind, SourceLocation};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
struct Binding {
    value: Value,
    constant: bool,
    kind: DeclKind,
}

/// Variable environment for one evaluation
#[derive(Debug)]
pub struct Scope {
    frames: Vec<FxHashMap<String, Binding>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            frames: vec![FxHashMap::default()],
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    /// Pop the innermost frame. The script-level frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn declare(
        &mut self,
        name: &str,
        value: Value,
        kind: DeclKind,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let frame_index = match kind {
            DeclKind::Var => 0,
            DeclKind::Let | DeclKind::Const => self.frames.len() - 1,
        };
        let frame = &mut self.frames[frame_index];

        if let Some(existing) = frame.get_mut(name) {
            // `var x` may repeat; anything involving let/const may not
            if kind == DeclKind::Var && existing.kind == DeclKind::Var {
                existing.value = value;
                return Ok(());
            }
            return Err(RuntimeError::Redeclaration {
                name: name.to_string(),
                location,
            });
        }

        frame.insert(
            name.to_string(),
            Binding {
                value,
                constant: kind == DeclKind::Const,
                kind,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .map(|binding| &binding.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn assign(
        &mut self,
        name: &str,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let binding = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(name))
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })?;

        if binding.constant {
            return Err(RuntimeError::ConstAssignment {
                name: name.to_string(),
                location,
            });
        }

        binding.value = value;
        Ok(())
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
