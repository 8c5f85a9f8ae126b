use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

/// Writes the full cell store somewhere outside the session.
///
/// Exporters are read-only over the grid: they receive the row-major cell
/// store and never mutate the document.
pub trait Exporter {
    fn export(&self, rows: &[Vec<String>], path: &Path) -> io::Result<()>;
}

/// RFC 4180 CSV export of the grid contents.
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, rows: &[Vec<String>], path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        info!("Grid exported to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_csv_export_writes_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c,with comma".to_string(), String::new()],
        ];
        CsvExporter.export(&rows, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "a,b");
        // Comma-bearing fields are quoted
        assert_eq!(lines[1], "\"c,with comma\",");
    }
}
