use crate::commands::GridCommand;
use crate::grid::GridDocument;
use tracing::{debug, info};

/// Executes commands and keeps the undo/redo history.
///
/// Any successful execute clears the redo stack; undo/redo on an empty
/// stack is a no-op. The stacks are unbounded. This stack is the single
/// canonical history: there is no parallel whole-grid-snapshot undo path.
pub struct CommandStack {
    undo_stack: Vec<GridCommand>,
    redo_stack: Vec<GridCommand>,
}

impl CommandStack {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Run a command against the document and record it for undo.
    pub fn execute(&mut self, mut command: GridCommand, doc: &mut GridDocument) {
        command.execute(doc);
        self.undo_stack.push(command);
        self.redo_stack.clear();
        debug!("Command executed: {} undo entries", self.undo_stack.len());
    }

    /// Reverse the most recent command. Returns its description, or None
    /// when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut GridDocument) -> Option<String> {
        let mut command = self.undo_stack.pop()?;
        command.undo(doc);
        let description = command.describe();
        info!("Undo: {}", description);
        self.redo_stack.push(command);
        Some(description)
    }

    /// Re-apply the most recently undone command. Returns its description,
    /// or None when there is nothing to redo.
    pub fn redo(&mut self, doc: &mut GridDocument) -> Option<String> {
        let mut command = self.redo_stack.pop()?;
        command.redo(doc);
        let description = command.describe();
        info!("Redo: {}", description);
        self.undo_stack.push(command);
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new()
    }
}
