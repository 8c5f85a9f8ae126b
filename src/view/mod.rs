/// View subsystem - Independent rendering and display management
///
/// Draws the grid, highlights, status line, and prompt line with crossterm.
/// The view is read-only over the document: it polls state and renders, it
/// never mutates cells or history.

pub mod renderer;

// Re-export public interface
pub use renderer::{RenderParams, View};
