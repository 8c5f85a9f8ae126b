use crate::grid::GridDocument;
use crate::history::CommandStack;
use crate::navigation::NavigationPolicy;
use crate::recognition::WordSource;
use crate::view::View;
use crossterm::event::KeyEvent;

/// Shared state that all mode controllers need access to.
///
/// The document, the history stacks, and the navigation policy are owned
/// here and passed explicitly to every operation; no controller keeps its
/// own ambient copy of the "current position".
pub struct SharedGridState {
    pub document: GridDocument,
    pub history: CommandStack,
    pub nav: NavigationPolicy,
    pub view: View,
    pub word_source: Option<Box<dyn WordSource>>,
    pub status_message: String,
}

/// Result of handling a key event in a mode controller.
#[derive(Debug, PartialEq)]
pub enum ModeTransition {
    Stay,
    /// Switch the document into edit mode on the selected cell. A printable
    /// trigger key seeds the edit buffer with that character; Enter/Space
    /// keep the existing content.
    EnterEdit { seed: Option<char> },
    /// Leave edit mode, committing the in-progress text if it changed.
    ExitEdit,
}

/// Trait that all mode controllers must implement.
pub trait ModeController {
    fn handle_key(&mut self, key_event: KeyEvent, shared: &mut SharedGridState) -> ModeTransition;
}
