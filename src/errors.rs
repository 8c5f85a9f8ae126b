use thiserror::Error;

/// Errors raised by the grid document and command construction.
///
/// Both variants are programming-error-class faults: a well-formed UI never
/// hands raw out-of-range coordinates to the core. They propagate rather
/// than being swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// An accessor was asked for a cell outside the current dimensions.
    #[error("cell ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// An edit command was constructed against a cell outside the grid.
    /// Construction fails before any mutation occurs.
    #[error("invalid cell coordinates: ({row}, {col})")]
    InvalidCoordinate { row: usize, col: usize },
}
