use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// Boundary surface toward the external recognition service.
///
/// Recognition yields `(bounding box, text, confidence)` triples; the grid
/// core only ever consumes the text, via word insertion. No image handling
/// happens on this side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWord {
    pub bounds: BoundingBox,
    pub text: String,
    pub confidence: f32,
}

/// A stream of recognized words feeding the grid.
pub trait WordSource {
    fn next_word(&mut self) -> Option<RecognizedWord>;

    /// Words left in the feed, shown in the status line.
    fn remaining(&self) -> usize;
}

/// Word feed backed by a plain text file: whitespace-separated tokens, in
/// reading order. Stands in for a live recognition service during
/// transcription sessions and in tests.
pub struct FileWordSource {
    words: VecDeque<String>,
}

impl FileWordSource {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let words: VecDeque<String> = content.split_whitespace().map(String::from).collect();
        info!("Loaded {} words from {}", words.len(), path.display());
        Ok(Self { words })
    }
}

impl WordSource for FileWordSource {
    fn next_word(&mut self) -> Option<RecognizedWord> {
        self.words.pop_front().map(|text| RecognizedWord {
            bounds: BoundingBox::default(),
            text,
            confidence: 1.0,
        })
    }

    fn remaining(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_word_source_yields_tokens_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha beta\n  gamma").unwrap();
        let mut source = FileWordSource::from_path(file.path()).unwrap();
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.next_word().unwrap().text, "alpha");
        assert_eq!(source.next_word().unwrap().text, "beta");
        let last = source.next_word().unwrap();
        assert_eq!(last.text, "gamma");
        assert_eq!(last.confidence, 1.0);
        assert!(source.next_word().is_none());
    }
}
