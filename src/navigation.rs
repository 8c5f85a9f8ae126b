use tracing::{debug, info};

/// Direction the cursor advances after a word insertion or Tab.
///
/// Cycle deliberately stays put so repeated insertions accumulate into the
/// same cell (gathering several recognized words into one field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMode {
    Horizontal,
    Vertical,
    Cycle,
}

impl NavMode {
    /// Display glyph, matching the mode selector labels.
    pub fn glyph(&self) -> &'static str {
        match self {
            NavMode::Horizontal => "→",
            NavMode::Vertical => "↓",
            NavMode::Cycle => "⟳",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavMode::Horizontal => "horizontal",
            NavMode::Vertical => "vertical",
            NavMode::Cycle => "cycle",
        }
    }
}

/// Holds the process-wide navigation mode and computes cursor advancement.
pub struct NavigationPolicy {
    mode: NavMode,
}

impl NavigationPolicy {
    pub fn new() -> Self {
        Self {
            mode: NavMode::Horizontal,
        }
    }

    pub fn mode(&self) -> NavMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: NavMode) {
        self.mode = mode;
        info!("Navigation mode changed to: {}", mode.name());
    }

    /// Next cursor position from (row, col) in a rows x cols grid.
    ///
    /// Horizontal and Vertical advance one step and clamp at the last
    /// column/row (no wrapping). Cycle returns the position unchanged.
    pub fn next_position(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> (usize, usize) {
        let next = match self.mode {
            NavMode::Horizontal => (row, (col + 1).min(cols.saturating_sub(1))),
            NavMode::Vertical => ((row + 1).min(rows.saturating_sub(1)), col),
            NavMode::Cycle => (row, col),
        };
        debug!(
            "Next position from ({}, {}) in mode '{}' -> {:?}",
            row,
            col,
            self.mode.name(),
            next
        );
        next
    }
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self::new()
    }
}
