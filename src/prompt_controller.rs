use crossterm::event::{KeyCode, KeyEvent};
use regex::Regex;
use std::path::PathBuf;

/// What the prompt line is currently asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// New grid dimensions, entered as "ROWSxCOLS" (e.g. "12x8").
    Resize,
    /// Path for the CSV export.
    Export,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Resize => "Resize (ROWSxCOLS): ",
            PromptKind::Export => "Export to: ",
        }
    }
}

/// Outcome of feeding a key to an active prompt.
#[derive(Debug, PartialEq)]
pub enum PromptOutcome {
    Pending,
    Cancelled,
    Resize(usize, usize),
    Export(PathBuf),
    Invalid(String),
}

/// Line-input prompt for resize dimensions and export paths.
///
/// Only one prompt can be active at a time; while active it captures all
/// key input, like a modal editor's command line.
pub struct PromptController {
    kind: Option<PromptKind>,
    buffer: String,
    resize_re: Regex,
}

impl PromptController {
    pub fn new() -> Self {
        Self {
            kind: None,
            buffer: String::new(),
            resize_re: Regex::new(r"^\s*(\d+)\s*[xX×]\s*(\d+)\s*$").unwrap(),
        }
    }

    pub fn open(&mut self, kind: PromptKind) {
        self.kind = Some(kind);
        self.buffer.clear();
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// Label and current buffer for rendering, when active.
    pub fn display(&self) -> Option<(&'static str, &str)> {
        self.kind.map(|kind| (kind.label(), self.buffer.as_str()))
    }

    pub fn handle_key(&mut self, key_event: KeyEvent) -> PromptOutcome {
        match key_event.code {
            KeyCode::Char(c) => {
                self.buffer.push(c);
                PromptOutcome::Pending
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptOutcome::Pending
            }
            KeyCode::Esc => {
                self.close();
                PromptOutcome::Cancelled
            }
            KeyCode::Enter => self.submit(),
            _ => PromptOutcome::Pending,
        }
    }

    fn submit(&mut self) -> PromptOutcome {
        let Some(kind) = self.kind else {
            return PromptOutcome::Pending;
        };
        let input = self.buffer.clone();
        match kind {
            PromptKind::Resize => match self.parse_dimensions(&input) {
                Some((rows, cols)) => {
                    self.close();
                    PromptOutcome::Resize(rows, cols)
                }
                None => {
                    // Leave the prompt open so the input can be fixed
                    PromptOutcome::Invalid(format!("Not a ROWSxCOLS size: '{}'", input.trim()))
                }
            },
            PromptKind::Export => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    PromptOutcome::Invalid("Export path is empty".to_string())
                } else {
                    self.close();
                    PromptOutcome::Export(PathBuf::from(trimmed))
                }
            }
        }
    }

    fn parse_dimensions(&self, input: &str) -> Option<(usize, usize)> {
        let caps = self.resize_re.captures(input)?;
        let rows: usize = caps[1].parse().ok()?;
        let cols: usize = caps[2].parse().ok()?;
        if rows == 0 || cols == 0 {
            return None;
        }
        Some((rows, cols))
    }

    fn close(&mut self) {
        self.kind = None;
        self.buffer.clear();
    }
}

impl Default for PromptController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(prompt: &mut PromptController, text: &str) {
        for c in text.chars() {
            prompt.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_resize_prompt_parses_dimensions() {
        let mut prompt = PromptController::new();
        prompt.open(PromptKind::Resize);
        type_str(&mut prompt, " 12 x 8 ");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Resize(12, 8)
        );
        assert!(!prompt.is_active());
    }

    #[test]
    fn test_resize_prompt_rejects_garbage_and_stays_open() {
        let mut prompt = PromptController::new();
        prompt.open(PromptKind::Resize);
        type_str(&mut prompt, "big");
        assert!(matches!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Invalid(_)
        ));
        assert!(prompt.is_active());
    }

    #[test]
    fn test_zero_dimension_is_invalid() {
        let mut prompt = PromptController::new();
        prompt.open(PromptKind::Resize);
        type_str(&mut prompt, "0x5");
        assert!(matches!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Invalid(_)
        ));
    }

    #[test]
    fn test_escape_cancels() {
        let mut prompt = PromptController::new();
        prompt.open(PromptKind::Export);
        type_str(&mut prompt, "out.csv");
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptOutcome::Cancelled);
        assert!(!prompt.is_active());
    }

    #[test]
    fn test_export_prompt_yields_path() {
        let mut prompt = PromptController::new();
        prompt.open(PromptKind::Export);
        type_str(&mut prompt, "grid.csv");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Export(PathBuf::from("grid.csv"))
        );
    }

    #[test]
    fn test_backspace_edits_buffer() {
        let mut prompt = PromptController::new();
        prompt.open(PromptKind::Resize);
        type_str(&mut prompt, "3x4");
        prompt.handle_key(key(KeyCode::Backspace));
        type_str(&mut prompt, "9");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            PromptOutcome::Resize(3, 9)
        );
    }
}
