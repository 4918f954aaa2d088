// File: crates/pie-core/src/history.rs
// Summary: Undo/redo stacks of executed commands with a depth limit.
// Notes:
// - A newly pushed command starts a new branch and clears the redo stack.
// - When the undo stack exceeds `max_depth` the oldest command is dropped.

use std::collections::VecDeque;

use crate::command::{Command, WidgetState};
use crate::error::CommandError;

pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug)]
pub struct CommandHistory {
    undo_stack: VecDeque<Command>,
    redo_stack: VecDeque<Command>,
    max_depth: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl CommandHistory {
    pub fn new(max_depth: usize) -> Self {
        Self { undo_stack: VecDeque::new(), redo_stack: VecDeque::new(), max_depth: max_depth.max(1) }
    }

    /// Execute `cmd` and record it. Nothing is recorded when execution fails.
    pub fn execute(&mut self, mut cmd: Command, state: &mut WidgetState) -> Result<(), CommandError> {
        cmd.execute(state)?;
        self.redo_stack.clear();
        self.undo_stack.push_back(cmd);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        Ok(())
    }

    /// Undo the newest command. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, state: &mut WidgetState) -> Result<Option<&'static str>, CommandError> {
        let Some(mut cmd) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        if let Err(e) = cmd.undo(state) {
            self.undo_stack.push_back(cmd);
            return Err(e);
        }
        let name = cmd.name();
        self.redo_stack.push_back(cmd);
        Ok(Some(name))
    }

    /// Redo the most recently undone command. `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self, state: &mut WidgetState) -> Result<Option<&'static str>, CommandError> {
        let Some(mut cmd) = self.redo_stack.pop_back() else {
            return Ok(None);
        };
        if let Err(e) = cmd.redo(state) {
            self.redo_stack.push_back(cmd);
            return Err(e);
        }
        let name = cmd.name();
        self.undo_stack.push_back(cmd);
        Ok(Some(name))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
