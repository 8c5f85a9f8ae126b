use crate::errors::GridError;
use crate::grid::GridDocument;
use crate::navigation::{NavMode, NavigationPolicy};
use tracing::{info, warn};

/// Replaces the text of a single cell.
///
/// The old text is captured once, at construction, from the document as it
/// is at that moment; undo restores exactly that capture. Construction
/// fails with `InvalidCoordinate` when the target is outside the grid, so
/// no partial state change can occur.
#[derive(Debug, Clone)]
pub struct EditCell {
    row: usize,
    col: usize,
    new_text: String,
    old_text: String,
}

impl EditCell {
    pub fn new(
        doc: &GridDocument,
        row: usize,
        col: usize,
        new_text: String,
    ) -> Result<Self, GridError> {
        if !doc.in_bounds(row, col) {
            return Err(GridError::InvalidCoordinate { row, col });
        }
        let old_text = doc.cells[row][col].clone();
        Ok(Self {
            row,
            col,
            new_text,
            old_text,
        })
    }

    pub fn target(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        self.apply(doc, self.new_text.clone());
        info!(
            "Cell ({}, {}) updated from '{}' to '{}'",
            self.row, self.col, self.old_text, self.new_text
        );
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        self.apply(doc, self.old_text.clone());
        info!(
            "Cell ({}, {}) restored to '{}'",
            self.row, self.col, self.old_text
        );
    }

    /// Reapplies the captured new text. Distinct from a blind re-execute in
    /// name only, but kept separate so position-sensitive reapplication has
    /// its own path.
    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.apply(doc, self.new_text.clone());
    }

    fn apply(&self, doc: &mut GridDocument, text: String) {
        // The cell can fall out of range if a structural undo shrank the
        // grid underneath us; skip rather than corrupt state.
        if !doc.in_bounds(self.row, self.col) {
            warn!(
                "Skipping edit of cell ({}, {}): outside current {}x{} grid",
                self.row, self.col, doc.rows, doc.cols
            );
            return;
        }
        doc.cells[self.row][self.col] = text;
        doc.cursor = (self.row, self.col);
    }
}

/// Clears every cell to the empty string while preserving the structure.
///
/// Snapshots the full grid on execute; undo restores the snapshot. Callers
/// skip this command entirely when the grid is already empty, so an empty
/// clear never lands in history.
#[derive(Debug, Clone)]
pub struct ClearAll {
    backup: Vec<Vec<String>>,
}

impl ClearAll {
    pub fn new() -> Self {
        Self { backup: Vec::new() }
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        info!("Clearing all grid data");
        self.backup = doc.snapshot();
        for row in doc.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.clear();
            }
        }
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        if self.backup.is_empty() {
            warn!("Cannot undo clear: no backup data available");
            return;
        }
        // Restore within the current bounds; structure was not touched by
        // execute, so normally this is a full restore.
        for (r, backup_row) in self.backup.iter().enumerate() {
            if r >= doc.rows {
                break;
            }
            for (c, value) in backup_row.iter().enumerate() {
                if c >= doc.cols {
                    break;
                }
                doc.cells[r][c] = value.clone();
            }
        }
        info!("Grid data restored from backup");
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.execute(doc);
    }
}

impl Default for ClearAll {
    fn default() -> Self {
        Self::new()
    }
}

/// Inserts a recognized word into the cell under the cursor.
///
/// In Cycle mode the word is appended to the existing content with a space;
/// in the other modes the cell is overwritten. Execution and undo are
/// delegated to an internal `EditCell`, so history treats a word insertion
/// exactly like any other cell edit.
#[derive(Debug, Clone)]
pub struct InsertWord {
    word: String,
    edit: EditCell,
}

impl InsertWord {
    pub fn new(
        doc: &GridDocument,
        nav: &NavigationPolicy,
        word: String,
    ) -> Result<Self, GridError> {
        let (row, col) = doc.cursor;
        let old_text = doc.get(row, col)?;
        let new_text = if nav.mode() == NavMode::Cycle {
            if old_text.is_empty() {
                word.clone()
            } else {
                format!("{} {}", old_text, word)
            }
        } else {
            word.clone()
        };
        let edit = EditCell::new(doc, row, col, new_text)?;
        Ok(Self { word, edit })
    }

    /// The affected cell and its final text, for the caller to reflect in
    /// the presentation layer.
    pub fn result(&self) -> (usize, usize, &str) {
        let (row, col) = self.edit.target();
        (row, col, self.edit.new_text())
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        let (row, col) = self.edit.target();
        info!("Inserting word '{}' into cell ({}, {})", self.word, row, col);
        self.edit.execute(doc);
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        let (row, col) = self.edit.target();
        info!("Undoing word insertion in cell ({}, {})", row, col);
        self.edit.undo(doc);
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.edit.redo(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavMode;

    #[test]
    fn test_edit_cell_captures_old_text_at_construction() {
        let mut doc = GridDocument::new(2, 2);
        doc.set(0, 0, "before".to_string()).unwrap();
        let mut cmd = EditCell::new(&doc, 0, 0, "after".to_string()).unwrap();
        // Mutate behind the command's back; undo must restore the capture,
        // not whatever happens to be there now.
        doc.set(0, 0, "unrelated".to_string()).unwrap();
        cmd.execute(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "after");
        cmd.undo(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "before");
    }

    #[test]
    fn test_edit_cell_moves_cursor_on_execute_and_undo() {
        let mut doc = GridDocument::new(3, 3);
        doc.set_cursor(2, 2);
        let mut cmd = EditCell::new(&doc, 1, 1, "x".to_string()).unwrap();
        cmd.execute(&mut doc);
        assert_eq!(doc.cursor, (1, 1));
        doc.set_cursor(0, 0);
        cmd.undo(&mut doc);
        assert_eq!(doc.cursor, (1, 1));
    }

    #[test]
    fn test_edit_cell_construction_fails_out_of_bounds() {
        let doc = GridDocument::new(2, 2);
        let err = EditCell::new(&doc, 2, 0, "x".to_string()).unwrap_err();
        assert_eq!(err, GridError::InvalidCoordinate { row: 2, col: 0 });
    }

    #[test]
    fn test_clear_all_round_trip() {
        let mut doc = GridDocument::new(2, 2);
        doc.set(0, 0, "X".to_string()).unwrap();
        doc.set(1, 1, "Y".to_string()).unwrap();
        let mut cmd = ClearAll::new();
        cmd.execute(&mut doc);
        assert!(doc.is_empty());
        cmd.undo(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "X");
        assert_eq!(doc.get(1, 1).unwrap(), "Y");
    }

    #[test]
    fn test_insert_word_overwrites_outside_cycle_mode() {
        let mut doc = GridDocument::new(1, 2);
        doc.set(0, 0, "old".to_string()).unwrap();
        let nav = NavigationPolicy::new();
        let mut cmd = InsertWord::new(&doc, &nav, "new".to_string()).unwrap();
        cmd.execute(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "new");
        assert_eq!(cmd.result(), (0, 0, "new"));
        cmd.undo(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "old");
    }

    #[test]
    fn test_insert_word_appends_with_space_in_cycle_mode() {
        let mut doc = GridDocument::new(1, 1);
        doc.set(0, 0, "foo".to_string()).unwrap();
        let mut nav = NavigationPolicy::new();
        nav.set_mode(NavMode::Cycle);
        let mut cmd = InsertWord::new(&doc, &nav, "bar".to_string()).unwrap();
        cmd.execute(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "foo bar");
    }

    #[test]
    fn test_insert_word_into_empty_cell_in_cycle_mode_has_no_leading_space() {
        let doc = GridDocument::new(1, 1);
        let mut nav = NavigationPolicy::new();
        nav.set_mode(NavMode::Cycle);
        let mut cmd = InsertWord::new(&doc, &nav, "foo".to_string()).unwrap();
        let mut doc = doc;
        cmd.execute(&mut doc);
        assert_eq!(doc.get(0, 0).unwrap(), "foo");
    }
}
