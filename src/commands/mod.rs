/// Reversible grid operations.
///
/// Every mutation of cell content or grid structure is expressed as a
/// `GridCommand` so the history stack can reverse and re-apply it. The set
/// is deliberately closed: dispatch is an exhaustive match, so a new
/// variant cannot be added without handling execute, undo, redo and its
/// description.
pub mod edit;
pub mod structure;

pub use edit::{ClearAll, EditCell, InsertWord};
pub use structure::{AppendColumn, AppendRow, InsertColumn, InsertRow, ResizeGrid};

use crate::grid::GridDocument;

pub enum GridCommand {
    EditCell(EditCell),
    InsertWord(InsertWord),
    ClearAll(ClearAll),
    AppendRow(AppendRow),
    AppendColumn(AppendColumn),
    InsertRow(InsertRow),
    InsertColumn(InsertColumn),
    ResizeGrid(ResizeGrid),
}

impl GridCommand {
    /// Apply the command's effect to the document.
    pub fn execute(&mut self, doc: &mut GridDocument) {
        match self {
            GridCommand::EditCell(cmd) => cmd.execute(doc),
            GridCommand::InsertWord(cmd) => cmd.execute(doc),
            GridCommand::ClearAll(cmd) => cmd.execute(doc),
            GridCommand::AppendRow(cmd) => cmd.execute(doc),
            GridCommand::AppendColumn(cmd) => cmd.execute(doc),
            GridCommand::InsertRow(cmd) => cmd.execute(doc),
            GridCommand::InsertColumn(cmd) => cmd.execute(doc),
            GridCommand::ResizeGrid(cmd) => cmd.execute(doc),
        }
    }

    /// Exactly reverse the most recent execute.
    pub fn undo(&mut self, doc: &mut GridDocument) {
        match self {
            GridCommand::EditCell(cmd) => cmd.undo(doc),
            GridCommand::InsertWord(cmd) => cmd.undo(doc),
            GridCommand::ClearAll(cmd) => cmd.undo(doc),
            GridCommand::AppendRow(cmd) => cmd.undo(doc),
            GridCommand::AppendColumn(cmd) => cmd.undo(doc),
            GridCommand::InsertRow(cmd) => cmd.undo(doc),
            GridCommand::InsertColumn(cmd) => cmd.undo(doc),
            GridCommand::ResizeGrid(cmd) => cmd.undo(doc),
        }
    }

    /// Re-apply after an undo. Content-free structural commands re-run
    /// execute; cell edits reapply their captured text.
    pub fn redo(&mut self, doc: &mut GridDocument) {
        match self {
            GridCommand::EditCell(cmd) => cmd.redo(doc),
            GridCommand::InsertWord(cmd) => cmd.redo(doc),
            GridCommand::ClearAll(cmd) => cmd.redo(doc),
            GridCommand::AppendRow(cmd) => cmd.redo(doc),
            GridCommand::AppendColumn(cmd) => cmd.redo(doc),
            GridCommand::InsertRow(cmd) => cmd.redo(doc),
            GridCommand::InsertColumn(cmd) => cmd.redo(doc),
            GridCommand::ResizeGrid(cmd) => cmd.redo(doc),
        }
    }

    /// Short human-readable label for status messages ("Undo: edit cell").
    pub fn describe(&self) -> String {
        match self {
            GridCommand::EditCell(cmd) => {
                let (row, col) = cmd.target();
                format!("edit cell ({}, {})", row, col)
            }
            GridCommand::InsertWord(cmd) => format!("insert word '{}'", cmd.word()),
            GridCommand::ClearAll(_) => "clear all".to_string(),
            GridCommand::AppendRow(_) => "append row".to_string(),
            GridCommand::AppendColumn(_) => "append column".to_string(),
            GridCommand::InsertRow(_) => "insert row".to_string(),
            GridCommand::InsertColumn(_) => "insert column".to_string(),
            GridCommand::ResizeGrid(_) => "resize grid".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_round_trips_through_the_enum() {
        let mut doc = GridDocument::new(2, 2);
        let mut cmd = GridCommand::EditCell(
            EditCell::new(&doc, 0, 1, "hello".to_string()).unwrap(),
        );
        cmd.execute(&mut doc);
        assert_eq!(doc.get(0, 1).unwrap(), "hello");
        cmd.undo(&mut doc);
        assert_eq!(doc.get(0, 1).unwrap(), "");
        cmd.redo(&mut doc);
        assert_eq!(doc.get(0, 1).unwrap(), "hello");
    }

    #[test]
    fn test_describe_names_the_operation() {
        let doc = GridDocument::new(2, 2);
        let cmd = GridCommand::EditCell(EditCell::new(&doc, 1, 0, String::new()).unwrap());
        assert_eq!(cmd.describe(), "edit cell (1, 0)");
        assert_eq!(GridCommand::AppendRow(AppendRow::new()).describe(), "append row");
    }
}
