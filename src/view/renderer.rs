use crate::grid::{GridDocument, InteractionMode};
use crate::navigation::NavMode;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{size, Clear, ClearType},
};
use std::io::{self, stdout, Write};
use unicode_width::UnicodeWidthChar;

/// Width of the row-number gutter on the left edge.
const GUTTER: u16 = 4;
/// Screen row where the grid body starts (row 0 is the column header).
const GRID_TOP: u16 = 1;
/// Rows reserved at the bottom for the status and message lines.
const FOOTER: u16 = 2;

/// Everything the renderer needs beyond the document itself.
pub struct RenderParams<'a> {
    pub nav_mode: NavMode,
    pub status_message: &'a str,
    /// Active prompt label and buffer, drawn on the message line.
    pub prompt: Option<(&'a str, &'a str)>,
    /// In-progress edit buffer and caret (char index) for the editing cell.
    pub edit: Option<(&'a str, usize)>,
    /// Recognized words left in the feed, when a feed is attached.
    pub words_remaining: Option<usize>,
}

/// Terminal renderer for the grid.
///
/// Redraws the visible region every frame and keeps scroll offsets so the
/// cursor stays on screen. All layout math lives here, which is also what
/// makes mouse hit-testing (`cell_at`) possible.
pub struct View {
    cell_width: usize,
    row_scroll: usize,
    col_scroll: usize,
    last_size: (u16, u16),
}

impl View {
    pub fn new(cell_width: usize) -> Self {
        Self {
            cell_width,
            row_scroll: 0,
            col_scroll: 0,
            last_size: (0, 0),
        }
    }

    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    fn slot_width(&self) -> usize {
        self.cell_width + 1
    }

    fn visible_rows(&self, term_height: u16) -> usize {
        term_height.saturating_sub(GRID_TOP + FOOTER) as usize
    }

    fn visible_cols(&self, term_width: u16) -> usize {
        (term_width.saturating_sub(GUTTER) as usize) / self.slot_width()
    }

    fn scroll_to_cursor(&mut self, doc: &GridDocument, term_width: u16, term_height: u16) {
        let (row, col) = doc.cursor;
        let visible_rows = self.visible_rows(term_height).max(1);
        let visible_cols = self.visible_cols(term_width).max(1);

        if row < self.row_scroll {
            self.row_scroll = row;
        } else if row >= self.row_scroll + visible_rows {
            self.row_scroll = row + 1 - visible_rows;
        }
        if col < self.col_scroll {
            self.col_scroll = col;
        } else if col >= self.col_scroll + visible_cols {
            self.col_scroll = col + 1 - visible_cols;
        }
    }

    /// Map a screen position to the grid cell under it, if any.
    pub fn cell_at(&self, x: u16, y: u16, doc: &GridDocument) -> Option<(usize, usize)> {
        if y < GRID_TOP || x < GUTTER {
            return None;
        }
        let row = self.row_scroll + (y - GRID_TOP) as usize;
        let offset = (x - GUTTER) as usize;
        // Clicks on the separator column between cells miss
        if offset % self.slot_width() == self.cell_width {
            return None;
        }
        let col = self.col_scroll + offset / self.slot_width();
        if doc.in_bounds(row, col) {
            Some((row, col))
        } else {
            None
        }
    }

    pub fn render(&mut self, doc: &GridDocument, params: &RenderParams) -> io::Result<()> {
        let (term_width, term_height) = size()?;
        self.last_size = (term_width, term_height);
        self.scroll_to_cursor(doc, term_width, term_height);

        let mut out = stdout();
        queue!(out, cursor::Hide, Clear(ClearType::All))?;

        self.draw_header(&mut out, doc, term_width)?;
        self.draw_rows(&mut out, doc, params, term_width, term_height)?;
        self.draw_status(&mut out, doc, params, term_width, term_height)?;
        self.draw_message(&mut out, params, term_height)?;
        self.place_caret(&mut out, doc, params)?;

        out.flush()
    }

    fn draw_header(
        &self,
        out: &mut impl Write,
        doc: &GridDocument,
        term_width: u16,
    ) -> io::Result<()> {
        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::DarkGrey),
            Print(" ".repeat(GUTTER as usize))
        )?;
        for (slot, col) in (self.col_scroll..doc.cols).enumerate() {
            let x = GUTTER as usize + slot * self.slot_width();
            if x + self.cell_width > term_width as usize {
                break;
            }
            let label = pad_to_width(&format!("C{}", col), self.cell_width);
            queue!(out, cursor::MoveTo(x as u16, 0), Print(label))?;
        }
        queue!(out, ResetColor)
    }

    fn draw_rows(
        &self,
        out: &mut impl Write,
        doc: &GridDocument,
        params: &RenderParams,
        term_width: u16,
        term_height: u16,
    ) -> io::Result<()> {
        let visible_rows = self.visible_rows(term_height);
        for (line, row) in (self.row_scroll..doc.rows).take(visible_rows).enumerate() {
            let y = GRID_TOP + line as u16;
            queue!(
                out,
                cursor::MoveTo(0, y),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("{:>3} ", row)),
                ResetColor
            )?;
            for (slot, col) in (self.col_scroll..doc.cols).enumerate() {
                let x = GUTTER as usize + slot * self.slot_width();
                if x + self.cell_width > term_width as usize {
                    break;
                }
                self.draw_cell(out, doc, params, row, col, x as u16, y)?;
            }
        }
        Ok(())
    }

    fn draw_cell(
        &self,
        out: &mut impl Write,
        doc: &GridDocument,
        params: &RenderParams,
        row: usize,
        col: usize,
        x: u16,
        y: u16,
    ) -> io::Result<()> {
        let editing = doc.editing_cell == Some((row, col));
        let selected = doc.cursor == (row, col);

        let content = if editing {
            params.edit.map(|(buffer, _)| buffer).unwrap_or("")
        } else {
            &doc.cells[row][col]
        };
        let text = pad_to_width(content, self.cell_width);

        queue!(out, cursor::MoveTo(x, y))?;
        if editing {
            queue!(
                out,
                SetBackgroundColor(Color::Green),
                SetForegroundColor(Color::Black)
            )?;
        } else if selected {
            queue!(
                out,
                SetBackgroundColor(Color::Blue),
                SetForegroundColor(Color::White)
            )?;
        }
        queue!(out, Print(text), ResetColor)
    }

    fn draw_status(
        &self,
        out: &mut impl Write,
        doc: &GridDocument,
        params: &RenderParams,
        term_width: u16,
        term_height: u16,
    ) -> io::Result<()> {
        let mode = match doc.interaction_mode {
            InteractionMode::Select => "SELECT",
            InteractionMode::Edit => "EDIT",
        };
        let mut status = format!(
            " {} | nav {} | {}x{} | cell ({}, {})",
            mode,
            params.nav_mode.glyph(),
            doc.rows,
            doc.cols,
            doc.cursor.0,
            doc.cursor.1
        );
        if let Some(remaining) = params.words_remaining {
            status.push_str(&format!(" | {} words left", remaining));
        }
        let status = pad_to_width(&status, term_width as usize);
        queue!(
            out,
            cursor::MoveTo(0, term_height.saturating_sub(2)),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White),
            Print(status),
            ResetColor
        )
    }

    fn draw_message(
        &self,
        out: &mut impl Write,
        params: &RenderParams,
        term_height: u16,
    ) -> io::Result<()> {
        let y = term_height.saturating_sub(1);
        queue!(out, cursor::MoveTo(0, y))?;
        if let Some((label, buffer)) = params.prompt {
            queue!(out, Print(format!("{}{}", label, buffer)))
        } else {
            queue!(out, Print(params.status_message))
        }
    }

    /// Show the terminal caret inside the editing cell (or at the end of an
    /// active prompt); otherwise it stays hidden.
    fn place_caret(
        &self,
        out: &mut impl Write,
        doc: &GridDocument,
        params: &RenderParams,
    ) -> io::Result<()> {
        if let Some((label, buffer)) = params.prompt {
            let x = (label.chars().count() + buffer.chars().count()) as u16;
            let y = self.last_size.1.saturating_sub(1);
            return queue!(out, cursor::MoveTo(x, y), cursor::Show);
        }
        let (Some((row, col)), Some((buffer, caret))) = (doc.editing_cell, params.edit) else {
            return Ok(());
        };
        if row < self.row_scroll || col < self.col_scroll {
            return Ok(());
        }
        let y = GRID_TOP as usize + (row - self.row_scroll);
        let x_base = GUTTER as usize + (col - self.col_scroll) * self.slot_width();
        let caret_offset: usize = buffer
            .chars()
            .take(caret)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let x = x_base + caret_offset.min(self.cell_width.saturating_sub(1));
        queue!(out, cursor::MoveTo(x as u16, y as u16), cursor::Show)
    }
}

/// Truncate `text` to `width` display columns and pad with spaces.
fn pad_to_width(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        result.push(c);
        used += w;
    }
    while used < width {
        result.push(' ');
        used += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_width_truncates_and_pads() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcd");
        assert_eq!(pad_to_width("", 3), "   ");
    }

    #[test]
    fn test_pad_to_width_respects_wide_characters() {
        // Each CJK glyph takes two columns
        assert_eq!(pad_to_width("日本語", 4), "日本");
        assert_eq!(pad_to_width("日", 3), "日 ");
    }

    #[test]
    fn test_cell_at_maps_screen_to_grid() {
        let view = View::new(12);
        let doc = GridDocument::new(3, 3);
        // First cell starts right after the gutter
        assert_eq!(view.cell_at(GUTTER, GRID_TOP, &doc), Some((0, 0)));
        // Second cell slot
        assert_eq!(view.cell_at(GUTTER + 13, GRID_TOP + 2, &doc), Some((2, 1)));
        // Header row and gutter are not cells
        assert_eq!(view.cell_at(GUTTER, 0, &doc), None);
        assert_eq!(view.cell_at(0, GRID_TOP, &doc), None);
        // Separator column between cells
        assert_eq!(view.cell_at(GUTTER + 12, GRID_TOP, &doc), None);
        // Beyond the grid
        assert_eq!(view.cell_at(GUTTER + 3 * 13, GRID_TOP, &doc), None);
    }
}
