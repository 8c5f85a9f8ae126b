use crate::commands::{EditCell, GridCommand};
use crate::mode_controllers::{ModeController, ModeTransition, SharedGridState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

/// Key handling while a cell's text is being edited.
///
/// Holds the in-progress buffer, the caret (a char index), and the value
/// captured when the edit began. Left/Right move the caret inside the cell;
/// arrow navigation between cells is rejected in this mode. Escape and
/// Enter exit the edit; the commit happens in `commit`, and only when the
/// text actually changed - that is the moment an edit becomes undoable.
pub struct EditController {
    cell: (usize, usize),
    buffer: String,
    caret: usize,
    original: String,
}

impl EditController {
    pub fn new() -> Self {
        Self {
            cell: (0, 0),
            buffer: String::new(),
            caret: 0,
            original: String::new(),
        }
    }

    /// Start editing the cell under the cursor. `seed` replaces the content
    /// with a single character and puts the caret right after it.
    pub fn begin(&mut self, shared: &mut SharedGridState, seed: Option<char>) {
        let doc = &mut shared.document;
        let (row, col) = doc.cursor;
        self.cell = (row, col);
        self.original = doc.cells[row][col].clone();
        match seed {
            Some(c) => {
                self.buffer = c.to_string();
                self.caret = 1;
            }
            None => {
                self.buffer = self.original.clone();
                self.caret = self.buffer.chars().count();
            }
        }
        doc.begin_edit(row, col);
        debug!("Started editing cell: ({}, {})", row, col);
    }

    /// Commit the in-progress edit through the command stack if the text
    /// changed since the edit began. Leaves mode handling to the caller.
    pub fn commit(&mut self, shared: &mut SharedGridState) {
        if self.buffer == self.original {
            debug!("Edit of cell {:?} unchanged, nothing to commit", self.cell);
            return;
        }
        let (row, col) = self.cell;
        let SharedGridState {
            document, history, ..
        } = shared;
        match EditCell::new(document, row, col, self.buffer.clone()) {
            Ok(cmd) => {
                history.execute(GridCommand::EditCell(cmd), document);
                info!(
                    "Cell ({}, {}) updated from '{}' to '{}'",
                    row, col, self.original, self.buffer
                );
            }
            Err(e) => {
                // The cell can only vanish if something structural happened
                // mid-edit; drop the edit rather than corrupt state.
                warn!("Discarding edit of cell ({}, {}): {}", row, col, e);
            }
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.caret);
        self.buffer.insert(at, c);
        self.caret += 1;
    }

    fn delete_before_caret(&mut self) {
        if self.caret == 0 {
            return;
        }
        let at = self.byte_index(self.caret - 1);
        self.buffer.remove(at);
        self.caret -= 1;
    }

    fn delete_at_caret(&mut self) {
        if self.caret >= self.buffer.chars().count() {
            return;
        }
        let at = self.byte_index(self.caret);
        self.buffer.remove(at);
    }
}

impl ModeController for EditController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedGridState) -> ModeTransition {
        match key_event.code {
            KeyCode::Esc | KeyCode::Enter => ModeTransition::ExitEdit,
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                ModeTransition::Stay
            }
            KeyCode::Backspace => {
                self.delete_before_caret();
                ModeTransition::Stay
            }
            KeyCode::Delete => {
                self.delete_at_caret();
                ModeTransition::Stay
            }
            KeyCode::Left => {
                self.caret = self.caret.saturating_sub(1);
                ModeTransition::Stay
            }
            KeyCode::Right => {
                self.caret = (self.caret + 1).min(self.buffer.chars().count());
                ModeTransition::Stay
            }
            KeyCode::Home => {
                self.caret = 0;
                ModeTransition::Stay
            }
            KeyCode::End => {
                self.caret = self.buffer.chars().count();
                ModeTransition::Stay
            }
            KeyCode::Up | KeyCode::Down => {
                // Cell navigation is a selection-mode affair
                shared.status_message = "Finish editing to navigate (Esc/Enter)".to_string();
                ModeTransition::Stay
            }
            _ => ModeTransition::Stay,
        }
    }
}

impl Default for EditController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridDocument, InteractionMode};
    use crate::history::CommandStack;
    use crate::navigation::NavigationPolicy;
    use crate::view::View;

    fn shared(rows: usize, cols: usize) -> SharedGridState {
        SharedGridState {
            document: GridDocument::new(rows, cols),
            history: CommandStack::new(),
            nav: NavigationPolicy::new(),
            view: View::new(12),
            word_source: None,
            status_message: String::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(ctl: &mut EditController, shared: &mut SharedGridState, text: &str) {
        for c in text.chars() {
            ctl.handle_key(key(KeyCode::Char(c)), shared);
        }
    }

    #[test]
    fn test_begin_without_seed_keeps_content_with_caret_at_end() {
        let mut shared = shared(2, 2);
        shared.document.set(0, 0, "abc".to_string()).unwrap();
        let mut ctl = EditController::new();
        ctl.begin(&mut shared, None);
        assert_eq!(ctl.buffer(), "abc");
        assert_eq!(ctl.caret(), 3);
        assert_eq!(shared.document.interaction_mode, InteractionMode::Edit);
        assert_eq!(shared.document.editing_cell, Some((0, 0)));
    }

    #[test]
    fn test_begin_with_seed_replaces_content() {
        let mut shared = shared(2, 2);
        shared.document.set(0, 0, "old text".to_string()).unwrap();
        let mut ctl = EditController::new();
        ctl.begin(&mut shared, Some('x'));
        assert_eq!(ctl.buffer(), "x");
        assert_eq!(ctl.caret(), 1);
    }

    #[test]
    fn test_commit_pushes_edit_only_when_changed() {
        let mut shared = shared(2, 2);
        shared.document.set(0, 0, "same".to_string()).unwrap();
        let mut ctl = EditController::new();
        ctl.begin(&mut shared, None);
        ctl.commit(&mut shared);
        assert!(!shared.history.can_undo());

        ctl.begin(&mut shared, None);
        type_str(&mut ctl, &mut shared, "!");
        ctl.commit(&mut shared);
        assert_eq!(shared.document.get(0, 0).unwrap(), "same!");
        assert!(shared.history.can_undo());
    }

    #[test]
    fn test_caret_editing_in_the_middle_of_the_buffer() {
        let mut shared = shared(1, 1);
        shared.document.set(0, 0, "ad".to_string()).unwrap();
        let mut ctl = EditController::new();
        ctl.begin(&mut shared, None);
        ctl.handle_key(key(KeyCode::Left), &mut shared);
        type_str(&mut ctl, &mut shared, "bc");
        assert_eq!(ctl.buffer(), "abcd");
        ctl.handle_key(key(KeyCode::Backspace), &mut shared);
        assert_eq!(ctl.buffer(), "abd");
        ctl.handle_key(key(KeyCode::Delete), &mut shared);
        assert_eq!(ctl.buffer(), "ab");
    }

    #[test]
    fn test_escape_and_enter_request_exit() {
        let mut shared = shared(1, 1);
        let mut ctl = EditController::new();
        ctl.begin(&mut shared, None);
        assert_eq!(
            ctl.handle_key(key(KeyCode::Esc), &mut shared),
            ModeTransition::ExitEdit
        );
        assert_eq!(
            ctl.handle_key(key(KeyCode::Enter), &mut shared),
            ModeTransition::ExitEdit
        );
    }

    #[test]
    fn test_arrow_navigation_is_rejected_while_editing() {
        let mut shared = shared(2, 2);
        let mut ctl = EditController::new();
        ctl.begin(&mut shared, None);
        assert_eq!(
            ctl.handle_key(key(KeyCode::Up), &mut shared),
            ModeTransition::Stay
        );
        assert_eq!(shared.document.cursor, (0, 0));
        assert!(!shared.status_message.is_empty());
    }
}
