use crate::commands::{AppendColumn, AppendRow, GridCommand};
use crate::grid::GridDocument;
use crate::history::CommandStack;
use tracing::info;

/// Auto-expands the grid as the cursor advances toward its edge.
///
/// Growth triggers when the target is on the last row/column, not only when
/// it would overflow: `target >= size - 1` grows one step earlier than a
/// strict out-of-bounds check would. Downstream navigation relies on the
/// early growth, so the condition is part of the contract.
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Append a row and/or column when `(target_row, target_col)` touches
    /// the grid's edge. Growth runs through the command stack, so it is
    /// undoable like any other structural change. Returns true when the
    /// grid changed shape, signaling the caller to rebuild any cached
    /// visual representation.
    pub fn expand_if_needed(
        doc: &mut GridDocument,
        target_row: usize,
        target_col: usize,
        stack: &mut CommandStack,
    ) -> bool {
        let mut expanded = false;
        if target_row + 1 >= doc.rows {
            stack.execute(GridCommand::AppendRow(AppendRow::new()), doc);
            expanded = true;
        }
        if target_col + 1 >= doc.cols {
            stack.execute(GridCommand::AppendColumn(AppendColumn::new()), doc);
            expanded = true;
        }
        if expanded {
            info!(
                "Grid expanded to {}x{} for target ({}, {})",
                doc.rows, doc.cols, target_row, target_col
            );
        }
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_by_one_grid_grows_both_ways() {
        // The single cell is simultaneously the last row and last column
        let mut doc = GridDocument::new(1, 1);
        let mut stack = CommandStack::new();
        assert!(GrowthPolicy::expand_if_needed(&mut doc, 0, 0, &mut stack));
        assert_eq!((doc.rows, doc.cols), (2, 2));
    }

    #[test]
    fn test_interior_target_does_not_grow() {
        let mut doc = GridDocument::new(4, 4);
        let mut stack = CommandStack::new();
        assert!(!GrowthPolicy::expand_if_needed(&mut doc, 1, 2, &mut stack));
        assert_eq!((doc.rows, doc.cols), (4, 4));
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_last_row_grows_one_step_early() {
        // Row 2 of 3 is the last row: growth fires even though 2 < 3
        let mut doc = GridDocument::new(3, 3);
        let mut stack = CommandStack::new();
        assert!(GrowthPolicy::expand_if_needed(&mut doc, 2, 1, &mut stack));
        assert_eq!((doc.rows, doc.cols), (4, 3));
    }

    #[test]
    fn test_growth_is_undoable_through_the_stack() {
        let mut doc = GridDocument::new(1, 3);
        let mut stack = CommandStack::new();
        GrowthPolicy::expand_if_needed(&mut doc, 0, 2, &mut stack);
        assert_eq!((doc.rows, doc.cols), (2, 4));
        // Two separate commands were pushed: row append, then column append
        stack.undo(&mut doc).unwrap();
        stack.undo(&mut doc).unwrap();
        assert_eq!((doc.rows, doc.cols), (1, 3));
    }
}
