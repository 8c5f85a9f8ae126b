use arboard::Clipboard;
use tracing::info;

/// Flatten the grid into tab-separated text, one line per row, so it pastes
/// cleanly into spreadsheet applications.
pub fn grid_to_tsv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Copy the full grid to the system clipboard as TSV.
pub fn copy_grid(rows: &[Vec<String>]) -> Result<(), String> {
    let text = grid_to_tsv(rows);
    Clipboard::new()
        .and_then(|mut c| c.set_text(text))
        .map_err(|e| format!("Could not access clipboard: {e}"))?;
    info!("Grid copied to clipboard");
    Ok(())
}

/// Read clipboard text for word insertion, collapsed to a single
/// whitespace-normalized token run. Returns None when the clipboard is
/// empty or holds no text.
pub fn read_word() -> Result<Option<String>, String> {
    let text = Clipboard::new()
        .and_then(|mut c| c.get_text())
        .map_err(|e| format!("Could not access clipboard: {e}"))?;
    let word = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if word.is_empty() {
        Ok(None)
    } else {
        Ok(Some(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_to_tsv_joins_rows_and_cells() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["".to_string(), "d".to_string()],
        ];
        assert_eq!(grid_to_tsv(&rows), "a\tb\n\td");
    }

    #[test]
    fn test_grid_to_tsv_empty_grid() {
        assert_eq!(grid_to_tsv(&[]), "");
    }
}
