use crate::commands::{EditCell, GridCommand};
use crate::mode_controllers::{ModeController, ModeTransition, SharedGridState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

/// Key handling while a cell is selected but not being edited.
///
/// Arrow keys navigate (legal only in this mode), Enter/Space or a
/// printable character enter edit mode, and Delete/Backspace clear the
/// selected cell through the command stack without leaving selection.
pub struct SelectController;

impl SelectController {
    pub fn new() -> Self {
        Self
    }

    fn move_cursor(shared: &mut SharedGridState, d_row: isize, d_col: isize) {
        let doc = &mut shared.document;
        let (row, col) = doc.cursor;
        let row = row.saturating_add_signed(d_row);
        let col = col.saturating_add_signed(d_col);
        doc.set_cursor(row, col);
        debug!("Cell selected: {:?}", doc.cursor);
    }

    fn clear_selected_cell(shared: &mut SharedGridState) {
        let SharedGridState {
            document, history, ..
        } = shared;
        let (row, col) = document.cursor;
        match EditCell::new(document, row, col, String::new()) {
            Ok(cmd) => {
                history.execute(GridCommand::EditCell(cmd), document);
                shared.status_message = format!("Cleared cell ({}, {})", row, col);
            }
            Err(e) => {
                shared.status_message = format!("Error: {e}");
            }
        }
    }
}

impl ModeController for SelectController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedGridState) -> ModeTransition {
        match key_event.code {
            KeyCode::Up => {
                Self::move_cursor(shared, -1, 0);
                ModeTransition::Stay
            }
            KeyCode::Down => {
                Self::move_cursor(shared, 1, 0);
                ModeTransition::Stay
            }
            KeyCode::Left => {
                Self::move_cursor(shared, 0, -1);
                ModeTransition::Stay
            }
            KeyCode::Right => {
                Self::move_cursor(shared, 0, 1);
                ModeTransition::Stay
            }
            KeyCode::Enter => ModeTransition::EnterEdit { seed: None },
            KeyCode::Char(' ') => ModeTransition::EnterEdit { seed: None },
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                // Typing over a selected cell starts a fresh edit seeded
                // with that character.
                ModeTransition::EnterEdit { seed: Some(c) }
            }
            KeyCode::Delete | KeyCode::Backspace => {
                Self::clear_selected_cell(shared);
                ModeTransition::Stay
            }
            _ => ModeTransition::Stay,
        }
    }
}

impl Default for SelectController {
    fn default() -> Self {
        Self::new()
    }
}
