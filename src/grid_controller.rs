use crate::clipboard;
use crate::commands::{ClearAll, GridCommand, InsertColumn, InsertRow, InsertWord, ResizeGrid};
use crate::config::RcConfig;
use crate::edit_controller::EditController;
use crate::export::{CsvExporter, Exporter};
use crate::grid::{GridDocument, InteractionMode};
use crate::growth::GrowthPolicy;
use crate::history::CommandStack;
use crate::mode_controllers::{ModeController, ModeTransition, SharedGridState};
use crate::navigation::{NavMode, NavigationPolicy};
use crate::prompt_controller::{PromptController, PromptKind, PromptOutcome};
use crate::recognition::WordSource;
use crate::select_controller::SelectController;
use crate::view::{RenderParams, View};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::stdout;
use std::path::Path;
use tracing::{info, warn};

/// Top-level controller: owns the shared state and the per-mode
/// controllers, runs the terminal event loop, and applies mode
/// transitions.
///
/// Global shortcuts (quit, undo/redo, structure changes, prompts, word
/// insertion) are handled here before anything reaches the active mode
/// controller; everything else is delegated by the document's current
/// interaction mode.
pub struct GridController {
    shared: SharedGridState,
    select: SelectController,
    edit: EditController,
    prompt: PromptController,
    exporter: CsvExporter,
}

impl GridController {
    pub fn new(config: &RcConfig, word_source: Option<Box<dyn WordSource>>) -> Self {
        let mut nav = NavigationPolicy::new();
        nav.set_mode(config.nav_mode);
        Self {
            shared: SharedGridState {
                document: GridDocument::new(config.rows, config.cols),
                history: CommandStack::new(),
                nav,
                view: View::new(config.cell_width),
                word_source,
                status_message: String::new(),
            },
            select: SelectController::new(),
            edit: EditController::new(),
            prompt: PromptController::new(),
            exporter: CsvExporter,
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;

        // Restore the terminal even if the loop errors or panics
        struct TerminalGuard;
        impl Drop for TerminalGuard {
            fn drop(&mut self) {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
            }
        }
        let _guard = TerminalGuard;

        self.run_loop()
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            self.draw()?;

            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    if !self.handle_key_event(key_event) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
                Event::Resize(_, _) => {
                    // The next draw picks up the new size
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> std::io::Result<()> {
        let edit = if self.shared.document.interaction_mode == InteractionMode::Edit {
            Some((self.edit.buffer(), self.edit.caret()))
        } else {
            None
        };
        let params = RenderParams {
            nav_mode: self.shared.nav.mode(),
            status_message: &self.shared.status_message,
            prompt: self.prompt.display(),
            edit,
            words_remaining: self.shared.word_source.as_ref().map(|s| s.remaining()),
        };
        self.shared.view.render(&self.shared.document, &params)
    }

    /// Returns false when the application should quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        // An active prompt captures all keys
        if self.prompt.is_active() {
            match self.prompt.handle_key(key_event) {
                PromptOutcome::Pending => {}
                PromptOutcome::Cancelled => {
                    self.shared.status_message = "Cancelled".to_string();
                }
                PromptOutcome::Resize(rows, cols) => self.apply_resize(rows, cols),
                PromptOutcome::Export(path) => self.do_export(&path),
                PromptOutcome::Invalid(msg) => {
                    self.shared.status_message = msg;
                }
            }
            return true;
        }

        self.shared.status_message.clear();

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        match key_event.code {
            KeyCode::Char('q') if ctrl => {
                self.finish_edit();
                info!("Quit requested");
                return false;
            }
            // Tab advances the cursor regardless of mode; moving away from
            // the editing cell commits the edit first.
            KeyCode::Tab => self.handle_tab(),
            KeyCode::Char('z') if ctrl => self.undo(),
            KeyCode::Char('y') if ctrl => self.redo(),
            KeyCode::F(2) => self.set_nav_mode(NavMode::Horizontal),
            KeyCode::F(3) => self.set_nav_mode(NavMode::Vertical),
            KeyCode::F(4) => self.set_nav_mode(NavMode::Cycle),
            KeyCode::Up if ctrl => self.insert_row_at(self.shared.document.cursor.0 as isize),
            KeyCode::Down if ctrl => {
                self.insert_row_at(self.shared.document.cursor.0 as isize + 1)
            }
            KeyCode::Left if ctrl => self.insert_column_at(self.shared.document.cursor.1 as isize),
            KeyCode::Right if ctrl => {
                self.insert_column_at(self.shared.document.cursor.1 as isize + 1)
            }
            KeyCode::Char('r') if ctrl => self.prompt.open(PromptKind::Resize),
            KeyCode::Char('e') if ctrl => self.prompt.open(PromptKind::Export),
            KeyCode::Char('l') if ctrl => self.clear_all(),
            KeyCode::Char('w') if ctrl => self.insert_next_recognized_word(),
            KeyCode::Char('v') if ctrl => self.insert_clipboard_word(),
            KeyCode::Char('c') if ctrl => self.copy_grid_to_clipboard(),
            _ => {
                let transition = match self.shared.document.interaction_mode {
                    InteractionMode::Select => {
                        self.select.handle_key(key_event, &mut self.shared)
                    }
                    InteractionMode::Edit => self.edit.handle_key(key_event, &mut self.shared),
                };
                self.apply_transition(transition);
            }
        }
        true
    }

    fn apply_transition(&mut self, transition: ModeTransition) {
        match transition {
            ModeTransition::Stay => {}
            ModeTransition::EnterEdit { seed } => self.enter_edit(seed),
            ModeTransition::ExitEdit => self.finish_edit(),
        }
    }

    fn enter_edit(&mut self, seed: Option<char>) {
        self.edit.begin(&mut self.shared, seed);
    }

    /// Leave edit mode, committing the in-progress text if it changed.
    /// No-op while in selection mode.
    fn finish_edit(&mut self) {
        if self.shared.document.interaction_mode != InteractionMode::Edit {
            return;
        }
        self.edit.commit(&mut self.shared);
        self.shared.document.end_edit();
    }

    /// Advance the cursor per the navigation policy, growing the grid at
    /// the edge. Growth can change the dimensions the advance is computed
    /// against, so the next position is recomputed after expanding.
    fn handle_tab(&mut self) {
        self.finish_edit();
        let SharedGridState {
            document,
            history,
            nav,
            ..
        } = &mut self.shared;
        let (row, col) = document.cursor;
        let (next_row, next_col) = nav.next_position(row, col, document.rows, document.cols);
        GrowthPolicy::expand_if_needed(document, next_row, next_col, history);
        let (next_row, next_col) = nav.next_position(row, col, document.rows, document.cols);
        document.set_cursor(next_row, next_col);
    }

    fn undo(&mut self) {
        let SharedGridState {
            document, history, ..
        } = &mut self.shared;
        let result = history.undo(document);
        self.shared.status_message = match result {
            Some(desc) => format!("Undo: {desc}"),
            None => "Nothing to undo".to_string(),
        };
    }

    fn redo(&mut self) {
        let SharedGridState {
            document, history, ..
        } = &mut self.shared;
        let result = history.redo(document);
        self.shared.status_message = match result {
            Some(desc) => format!("Redo: {desc}"),
            None => "Nothing to redo".to_string(),
        };
    }

    fn set_nav_mode(&mut self, mode: NavMode) {
        self.shared.nav.set_mode(mode);
        self.shared.status_message = format!("Navigation: {} {}", mode.name(), mode.glyph());
    }

    fn insert_row_at(&mut self, index: isize) {
        let SharedGridState {
            document, history, ..
        } = &mut self.shared;
        history.execute(GridCommand::InsertRow(InsertRow::new(index)), document);
        self.shared.status_message = format!("Row inserted (grid now {}x{})",
            self.shared.document.rows, self.shared.document.cols);
    }

    fn insert_column_at(&mut self, index: isize) {
        let SharedGridState {
            document, history, ..
        } = &mut self.shared;
        history.execute(GridCommand::InsertColumn(InsertColumn::new(index)), document);
        self.shared.status_message = format!("Column inserted (grid now {}x{})",
            self.shared.document.rows, self.shared.document.cols);
    }

    /// Clear every cell. Skipped entirely on an already-empty grid so an
    /// effect-free clear never lands in history.
    fn clear_all(&mut self) {
        if self.shared.document.is_empty() {
            self.shared.status_message = "Grid is already empty".to_string();
            return;
        }
        self.finish_edit();
        let SharedGridState {
            document, history, ..
        } = &mut self.shared;
        history.execute(GridCommand::ClearAll(ClearAll::new()), document);
        self.shared.status_message = "Grid cleared".to_string();
    }

    fn apply_resize(&mut self, rows: usize, cols: usize) {
        self.finish_edit();
        let SharedGridState {
            document, history, ..
        } = &mut self.shared;
        let cmd = ResizeGrid::new(document, rows, cols);
        history.execute(GridCommand::ResizeGrid(cmd), document);
        self.shared.status_message = format!("Grid resized to {rows}x{cols}");
    }

    fn do_export(&mut self, path: &Path) {
        self.finish_edit();
        match self
            .exporter
            .export(self.shared.document.rows_of_cells(), path)
        {
            Ok(()) => {
                self.shared.status_message = format!("Exported to '{}'", path.display());
            }
            Err(e) => {
                warn!("Export to '{}' failed: {}", path.display(), e);
                self.shared.status_message = format!("Export failed: {e}");
            }
        }
    }

    fn insert_next_recognized_word(&mut self) {
        let Some(word) = self
            .shared
            .word_source
            .as_mut()
            .and_then(|source| source.next_word())
        else {
            self.shared.status_message = "No more recognized words".to_string();
            return;
        };
        self.insert_word(word.text);
    }

    fn insert_clipboard_word(&mut self) {
        match clipboard::read_word() {
            Ok(Some(word)) => self.insert_word(word),
            Ok(None) => {
                self.shared.status_message = "Clipboard is empty".to_string();
            }
            Err(e) => {
                self.shared.status_message = e;
            }
        }
    }

    fn copy_grid_to_clipboard(&mut self) {
        self.shared.status_message =
            match clipboard::copy_grid(self.shared.document.rows_of_cells()) {
                Ok(()) => "Grid copied to clipboard".to_string(),
                Err(e) => e,
            };
    }

    /// Put a word into the cell under the cursor, then grow and advance
    /// per the navigation policy. Growth is checked at the written cell, so
    /// filling the last column/row expands the grid before the advance.
    pub fn insert_word(&mut self, word: String) {
        self.finish_edit();
        let SharedGridState {
            document,
            history,
            nav,
            ..
        } = &mut self.shared;
        let cmd = match InsertWord::new(document, nav, word) {
            Ok(cmd) => cmd,
            Err(e) => {
                warn!("Word insertion failed: {}", e);
                self.shared.status_message = format!("Error: {e}");
                return;
            }
        };
        let (row, col, _) = cmd.result();
        let word_label = cmd.word().to_string();
        history.execute(GridCommand::InsertWord(cmd), document);
        GrowthPolicy::expand_if_needed(document, row, col, history);
        let (next_row, next_col) = nav.next_position(row, col, document.rows, document.cols);
        document.set_cursor(next_row, next_col);
        self.shared.status_message = format!("Inserted '{}'", word_label);
    }

    fn handle_mouse(&mut self, mouse_event: MouseEvent) {
        if mouse_event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some((row, col)) =
            self.shared
                .view
                .cell_at(mouse_event.column, mouse_event.row, &self.shared.document)
        else {
            return;
        };
        self.click_cell(row, col);
    }

    /// Click transitions: clicking the selected cell starts an edit,
    /// clicking another cell moves the selection, and clicking away from
    /// the editing cell commits the edit first. Clicking the editing cell
    /// itself does nothing.
    pub fn click_cell(&mut self, row: usize, col: usize) {
        let doc = &self.shared.document;
        match doc.interaction_mode {
            InteractionMode::Edit => {
                if doc.editing_cell == Some((row, col)) {
                    return;
                }
                self.finish_edit();
                self.shared.document.set_cursor(row, col);
            }
            InteractionMode::Select => {
                if doc.cursor == (row, col) {
                    self.enter_edit(None);
                } else {
                    self.shared.document.set_cursor(row, col);
                }
            }
        }
    }

    #[cfg(test)]
    fn document(&self) -> &GridDocument {
        &self.shared.document
    }
}
