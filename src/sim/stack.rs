//! Player stack with linear undo/redo
//!
//! Two-stack model: undo moves the top layer onto the redo buffer, redo moves
//! it back. Only a fresh append (or reset) throws the redo history away.

use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEditor {
    /// Bottom to top
    stack: Vec<Ingredient>,
    /// Most recently undone first
    redo: Vec<Ingredient>,
}

impl StackEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a layer on top. Invalidates all redo history.
    pub fn append(&mut self, kind: Ingredient) {
        self.stack.push(kind);
        self.redo.clear();
    }

    /// Take the top layer off; no-op on an empty stack
    pub fn undo(&mut self) -> Option<Ingredient> {
        let item = self.stack.pop()?;
        self.redo.insert(0, item);
        Some(item)
    }

    /// Re-place the most recently undone layer; no-op with nothing to redo
    pub fn redo(&mut self) -> Option<Ingredient> {
        if self.redo.is_empty() {
            return None;
        }
        let item = self.redo.remove(0);
        self.stack.push(item);
        Some(item)
    }

    pub fn reset(&mut self) {
        self.stack.clear();
        self.redo.clear();
    }

    pub fn stack(&self) -> &[Ingredient] {
        &self.stack
    }

    pub fn redo_buffer(&self) -> &[Ingredient] {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
