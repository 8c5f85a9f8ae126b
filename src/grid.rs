use crate::errors::GridError;
use tracing::{debug, error, info};

/// How user input is currently interpreted.
///
/// Select: keys navigate and select cells. Edit: keys edit the text of one
/// cell. The document tracks the mode so every layer agrees on what a
/// keystroke means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Select,
    Edit,
}

/// The grid document: a rectangular table of text cells plus the transient
/// UI state that points into it (cursor, interaction mode, editing cell).
///
/// Cell and structure changes go through commands so they are undoable;
/// cursor and mode changes are applied directly and are not part of history.
/// Invariants: every row holds exactly `cols` entries, and the cursor is
/// in-bounds whenever the grid is non-empty.
#[derive(Clone)]
pub struct GridDocument {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<String>>,
    pub cursor: (usize, usize),
    pub interaction_mode: InteractionMode,
    pub editing_cell: Option<(usize, usize)>,
}

impl GridDocument {
    pub fn new(rows: usize, cols: usize) -> Self {
        info!("Grid initialized with size {}x{}", rows, cols);
        Self {
            rows,
            cols,
            cells: vec![vec![String::new(); cols]; rows],
            cursor: (0, 0),
            interaction_mode: InteractionMode::Select,
            editing_cell: None,
        }
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&str, GridError> {
        if !self.in_bounds(row, col) {
            error!("Attempted to access invalid cell ({}, {})", row, col);
            return Err(GridError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.cells[row][col])
    }

    /// Direct cell mutation. Used by command implementations only; UI code
    /// mutates cells exclusively through commands on the stack.
    pub fn set(&mut self, row: usize, col: usize, value: String) -> Result<(), GridError> {
        if !self.in_bounds(row, col) {
            error!("Attempted to write invalid cell ({}, {})", row, col);
            return Err(GridError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.cells[row][col] = value;
        Ok(())
    }

    /// Resize to `rows` x `cols`: allocates a fresh store, copies the
    /// overlapping rectangle from the old one, fills the rest with empty
    /// strings, and clamps the cursor into the new bounds.
    pub fn resize_to(&mut self, rows: usize, cols: usize) {
        let mut new_cells = vec![vec![String::new(); cols]; rows];
        for (r, row) in self.cells.iter().enumerate().take(rows) {
            for (c, cell) in row.iter().enumerate().take(cols) {
                new_cells[r][c] = cell.clone();
            }
        }
        self.rows = rows;
        self.cols = cols;
        self.cells = new_cells;
        self.clamp_cursor();
        debug!(
            "Grid resized to {}x{}, cursor at {:?}",
            rows, cols, self.cursor
        );
    }

    /// Deep copy of the cell store, for commands that snapshot the whole
    /// grid (resize, clear). Keeps the stored "before" state from aliasing
    /// the live grid.
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.cells.clone()
    }

    /// Replace the entire store with a previously taken snapshot.
    pub fn restore(&mut self, cells: Vec<Vec<String>>, rows: usize, cols: usize) {
        self.cells = cells;
        self.rows = rows;
        self.cols = cols;
        self.clamp_cursor();
    }

    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = (row, col);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let (r, c) = self.cursor;
        self.cursor = (
            r.min(self.rows.saturating_sub(1)),
            c.min(self.cols.saturating_sub(1)),
        );
    }

    /// Enter edit mode on a cell. The editing cell is non-None exactly while
    /// the mode is Edit.
    pub fn begin_edit(&mut self, row: usize, col: usize) {
        self.interaction_mode = InteractionMode::Edit;
        self.editing_cell = Some((row, col));
        self.cursor = (row, col);
    }

    /// Leave edit mode, clearing the editing cell.
    pub fn end_edit(&mut self) {
        self.interaction_mode = InteractionMode::Select;
        self.editing_cell = None;
    }

    /// True when every cell is the empty string.
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Read-only view of the full cell store, row-major, for export.
    pub fn rows_of_cells(&self) -> &[Vec<String>] {
        &self.cells
    }
}
