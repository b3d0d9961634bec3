//! Word corpus for filler-text generation.

use crate::error::PopulateError;
use std::path::Path;
use tracing::info;

/// Default corpus location, the system dictionary.
pub const DEFAULT_WORDS_PATH: &str = "/usr/share/dict/words";

/// A flat, read-only list of words loaded once at startup and indexed
/// randomly by the text-filler routines.
#[derive(Debug)]
pub struct WordCorpus {
    words: Vec<String>,
}

impl WordCorpus {
    /// Load a newline-delimited word file.
    ///
    /// A missing file or a file with no usable words is fatal; filler text
    /// cannot be generated without a corpus.
    pub fn load(path: &Path) -> Result<Self, PopulateError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PopulateError::Config(format!("cannot read word corpus {}: {e}", path.display()))
        })?;
        let words: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(PopulateError::Config(format!(
                "word corpus {} contains no words",
                path.display()
            )));
        }
        info!("Loaded {} words from {}", words.len(), path.display());
        Ok(Self { words })
    }

    /// Build a corpus from an in-memory word list.
    pub fn from_words(words: Vec<String>) -> Result<Self, PopulateError> {
        if words.is_empty() {
            return Err(PopulateError::Config("word corpus is empty".to_string()));
        }
        Ok(Self { words })
    }

    /// Number of words in the corpus.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Map a uniform draw in [0, 1) to a word via `floor(draw * len)`.
    /// The floor bias is negligible for practical corpus sizes.
    pub fn pick(&self, draw: f64) -> &str {
        let idx = (draw * self.words.len() as f64) as usize;
        &self.words[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn corpus() -> WordCorpus {
        WordCorpus::from_words(vec!["alpha".into(), "beta".into(), "gamma".into()]).unwrap()
    }

    #[test]
    fn test_pick_maps_draw_to_index() {
        let c = corpus();
        assert_eq!(c.pick(0.0), "alpha");
        assert_eq!(c.pick(0.5), "beta");
        assert_eq!(c.pick(0.99), "gamma");
    }

    #[test]
    fn test_empty_corpus_is_fatal() {
        assert!(WordCorpus::from_words(vec![]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "one\ntwo\n\n  three  ").unwrap();
        let c = WordCorpus::load(f.path()).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.pick(0.0), "one");
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = WordCorpus::load(Path::new("/nonexistent/words")).unwrap_err();
        assert!(matches!(err, PopulateError::Config(_)));
    }

    #[test]
    fn test_load_blank_file_is_fatal() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "\n\n").unwrap();
        assert!(WordCorpus::load(f.path()).is_err());
    }
}
