use crate::grid::GridDocument;
use tracing::{info, warn};

/// Appends an empty row at the bottom of the grid.
///
/// Redo simply re-runs execute: the operation is content-free.
#[derive(Debug, Clone)]
pub struct AppendRow {
    added_index: Option<usize>,
    inserted_row: Vec<String>,
}

impl AppendRow {
    pub fn new() -> Self {
        Self {
            added_index: None,
            inserted_row: Vec::new(),
        }
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        self.added_index = Some(doc.rows);
        self.inserted_row = vec![String::new(); doc.cols];
        doc.cells.push(self.inserted_row.clone());
        doc.rows += 1;
        info!("Row added at index {}", doc.rows - 1);
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        if doc.rows == 0 {
            warn!("Cannot undo row append: no rows to remove");
            return;
        }
        let removed = doc.cells.pop().unwrap_or_default();
        doc.rows -= 1;
        doc.set_cursor(doc.cursor.0, doc.cursor.1);
        info!("Row removed from index {}", doc.rows);
        // Diagnostics only: the popped row should match what was inserted.
        if removed != self.inserted_row {
            warn!("Removed row does not match original inserted row");
        }
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.execute(doc);
    }
}

impl Default for AppendRow {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends an empty column at the right edge of the grid.
#[derive(Debug, Clone)]
pub struct AppendColumn {
    added_index: Option<usize>,
}

impl AppendColumn {
    pub fn new() -> Self {
        Self { added_index: None }
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        self.added_index = Some(doc.cols);
        for row in doc.cells.iter_mut() {
            row.push(String::new());
        }
        doc.cols += 1;
        info!("Column added at index {}", doc.cols - 1);
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        if doc.cols == 0 {
            warn!("Cannot undo column append: no columns to remove");
            return;
        }
        let mut non_empty = false;
        for row in doc.cells.iter_mut() {
            if let Some(cell) = row.pop() {
                non_empty |= !cell.is_empty();
            }
        }
        doc.cols -= 1;
        doc.set_cursor(doc.cursor.0, doc.cursor.1);
        info!("Column removed from index {}", doc.cols);
        if non_empty {
            warn!("Removed column was not empty");
        }
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.execute(doc);
    }
}

impl Default for AppendColumn {
    fn default() -> Self {
        Self::new()
    }
}

/// Inserts an empty row at an arbitrary index.
///
/// An out-of-range index is not an error: it is clamped to append-at-end
/// with a warning, and execution still succeeds.
#[derive(Debug, Clone)]
pub struct InsertRow {
    index: isize,
    applied_index: Option<usize>,
}

impl InsertRow {
    pub fn new(index: isize) -> Self {
        Self {
            index,
            applied_index: None,
        }
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        let index = if self.index < 0 || self.index > doc.rows as isize {
            warn!(
                "Invalid row index {}. Must be between 0 and {}",
                self.index, doc.rows
            );
            doc.rows
        } else {
            self.index as usize
        };
        doc.cells.insert(index, vec![String::new(); doc.cols]);
        doc.rows += 1;
        self.applied_index = Some(index);
        info!("Row inserted at index {}", index);
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        let Some(index) = self.applied_index else {
            warn!("Cannot undo row insertion: command was never executed");
            return;
        };
        if doc.rows == 0 || index >= doc.rows {
            warn!("Cannot undo row insertion: invalid row index {}", index);
            return;
        }
        let removed = doc.cells.remove(index);
        doc.rows -= 1;
        doc.set_cursor(doc.cursor.0, doc.cursor.1);
        info!("Row removed from index {}", index);
        if removed.iter().any(|cell| !cell.is_empty()) {
            warn!("Removed row was not empty");
        }
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.execute(doc);
    }
}

/// Inserts an empty column at an arbitrary index, with the same clamp
/// policy as `InsertRow`.
#[derive(Debug, Clone)]
pub struct InsertColumn {
    index: isize,
    applied_index: Option<usize>,
}

impl InsertColumn {
    pub fn new(index: isize) -> Self {
        Self {
            index,
            applied_index: None,
        }
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        let index = if self.index < 0 || self.index > doc.cols as isize {
            warn!(
                "Invalid column index {}. Must be between 0 and {}",
                self.index, doc.cols
            );
            doc.cols
        } else {
            self.index as usize
        };
        for row in doc.cells.iter_mut() {
            row.insert(index, String::new());
        }
        doc.cols += 1;
        self.applied_index = Some(index);
        info!("Column inserted at index {}", index);
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        let Some(index) = self.applied_index else {
            warn!("Cannot undo column insertion: command was never executed");
            return;
        };
        if doc.cols == 0 || index >= doc.cols {
            warn!("Cannot undo column insertion: invalid column index {}", index);
            return;
        }
        let mut non_empty = false;
        for row in doc.cells.iter_mut() {
            non_empty |= !row.remove(index).is_empty();
        }
        doc.cols -= 1;
        doc.set_cursor(doc.cursor.0, doc.cursor.1);
        info!("Column removed from index {}", index);
        if non_empty {
            warn!("Removed column was not empty");
        }
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.execute(doc);
    }
}

/// Resizes the grid to new dimensions.
///
/// Resize touches every cell, so delta tracking buys nothing: the command
/// snapshots the whole old grid (deep copy), old dimensions, and old cursor
/// at construction, and undo restores that snapshot verbatim.
#[derive(Debug, Clone)]
pub struct ResizeGrid {
    new_rows: usize,
    new_cols: usize,
    old_rows: usize,
    old_cols: usize,
    old_cells: Vec<Vec<String>>,
    old_cursor: (usize, usize),
}

impl ResizeGrid {
    pub fn new(doc: &GridDocument, new_rows: usize, new_cols: usize) -> Self {
        Self {
            new_rows,
            new_cols,
            old_rows: doc.rows,
            old_cols: doc.cols,
            old_cells: doc.snapshot(),
            old_cursor: doc.cursor,
        }
    }

    pub(super) fn execute(&mut self, doc: &mut GridDocument) {
        info!(
            "Resizing grid: {}x{} -> {}x{}",
            self.old_rows, self.old_cols, self.new_rows, self.new_cols
        );
        doc.resize_to(self.new_rows, self.new_cols);
    }

    pub(super) fn undo(&mut self, doc: &mut GridDocument) {
        info!(
            "Undoing resize: restoring size to {}x{}",
            self.old_rows, self.old_cols
        );
        doc.restore(self.old_cells.clone(), self.old_rows, self.old_cols);
        doc.cursor = self.old_cursor;
    }

    pub(super) fn redo(&mut self, doc: &mut GridDocument) {
        self.execute(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_content(rows: usize, cols: usize) -> GridDocument {
        let mut doc = GridDocument::new(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                doc.set(r, c, format!("r{}c{}", r, c)).unwrap();
            }
        }
        doc
    }

    #[test]
    fn test_append_row_round_trip() {
        let mut doc = grid_with_content(2, 2);
        let mut cmd = AppendRow::new();
        cmd.execute(&mut doc);
        assert_eq!(doc.rows, 3);
        assert_eq!(doc.cells[2], vec!["", ""]);
        cmd.undo(&mut doc);
        assert_eq!(doc.rows, 2);
        assert_eq!(doc.get(1, 1).unwrap(), "r1c1");
    }

    #[test]
    fn test_append_column_round_trip() {
        let mut doc = grid_with_content(2, 2);
        let mut cmd = AppendColumn::new();
        cmd.execute(&mut doc);
        assert_eq!(doc.cols, 3);
        for row in &doc.cells {
            assert_eq!(row.len(), 3);
            assert_eq!(row[2], "");
        }
        cmd.undo(&mut doc);
        assert_eq!(doc.cols, 2);
        assert_eq!(doc.get(0, 1).unwrap(), "r0c1");
    }

    #[test]
    fn test_insert_row_shifts_existing_rows() {
        let mut doc = GridDocument::new(3, 2);
        doc.set(0, 0, "a".to_string()).unwrap();
        doc.set(0, 1, "b".to_string()).unwrap();
        let mut cmd = InsertRow::new(0);
        cmd.execute(&mut doc);
        assert_eq!(doc.rows, 4);
        assert_eq!(doc.cells[0], vec!["", ""]);
        assert_eq!(doc.cells[1], vec!["a", "b"]);
        cmd.undo(&mut doc);
        assert_eq!(doc.rows, 3);
        assert_eq!(doc.cells[0], vec!["a", "b"]);
    }

    #[test]
    fn test_insert_column_negative_index_clamps_to_append() {
        let mut doc = grid_with_content(2, 3);
        let mut clamped = InsertColumn::new(-5);
        clamped.execute(&mut doc);

        let mut expected = grid_with_content(2, 3);
        let mut appended = InsertColumn::new(3);
        appended.execute(&mut expected);

        assert_eq!(doc.cells, expected.cells);
        assert_eq!(doc.cols, 4);
    }

    #[test]
    fn test_insert_row_oversized_index_clamps_to_append() {
        let mut doc = GridDocument::new(2, 2);
        let mut cmd = InsertRow::new(99);
        cmd.execute(&mut doc);
        assert_eq!(doc.rows, 3);
        cmd.undo(&mut doc);
        assert_eq!(doc.rows, 2);
    }

    #[test]
    fn test_undo_before_execute_is_skipped() {
        let mut doc = GridDocument::new(2, 2);
        let mut cmd = InsertRow::new(0);
        cmd.undo(&mut doc);
        assert_eq!(doc.rows, 2);
    }

    #[test]
    fn test_resize_shrink_then_undo_restores_all_content() {
        let mut doc = grid_with_content(5, 5);
        let original = doc.snapshot();
        let mut cmd = ResizeGrid::new(&doc, 2, 2);
        cmd.execute(&mut doc);
        assert_eq!(doc.rows, 2);
        assert_eq!(doc.cols, 2);
        cmd.undo(&mut doc);
        assert_eq!(doc.rows, 5);
        assert_eq!(doc.cols, 5);
        // All 25 values back, including the 21 outside the shrunk bounds
        assert_eq!(doc.cells, original);
    }

    #[test]
    fn test_resize_undo_restores_cursor_verbatim() {
        let mut doc = grid_with_content(4, 4);
        doc.set_cursor(3, 2);
        let mut cmd = ResizeGrid::new(&doc, 2, 2);
        cmd.execute(&mut doc);
        assert_eq!(doc.cursor, (1, 1));
        cmd.undo(&mut doc);
        assert_eq!(doc.cursor, (3, 2));
    }
}
