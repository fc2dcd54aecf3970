//! Word sources for passphrases.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WORDLIST: &str = include_str!("wordlist.txt");

static DEFAULT_WORDS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| parse_words(WORDLIST).collect());

/// The built-in list of 2052 lowercase words.
pub fn default_wordlist() -> &'static [&'static str] {
    &DEFAULT_WORDS
}

/// The words a passphrase draws from.
#[derive(Clone, Debug)]
pub enum WordSource {
    Builtin(&'static [&'static str]),
    Custom(Vec<String>),
}

impl WordSource {
    pub fn len(&self) -> usize {
        match self {
            WordSource::Builtin(words) => words.len(),
            WordSource::Custom(words) => words.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Panics if `index` is out of range.
    pub fn word(&self, index: usize) -> &str {
        match self {
            WordSource::Builtin(words) => words[index],
            WordSource::Custom(words) => &words[index],
        }
    }
}

impl Default for WordSource {
    fn default() -> WordSource {
        WordSource::Builtin(default_wordlist())
    }
}

/// Load a newline-delimited wordlist, ignoring blank lines.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>, WordlistError> {
    let data = fs::read_to_string(path).map_err(|source| WordlistError::Io {
        path: path.to_owned(),
        source,
    })?;
    let words = parse_words(&data)
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>();
    if words.is_empty() {
        return Err(WordlistError::Empty(path.to_owned()));
    }
    log::debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

fn parse_words(data: &str) -> impl Iterator<Item = &str> {
    data.lines().map(str::trim).filter(|line| !line.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum WordlistError {
    #[error("failed to read wordlist {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("the wordlist {} contains no words", .0.display())]
    Empty(PathBuf),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_list_has_2052_distinct_lowercase_words() {
        let words = default_wordlist();
        assert_eq!(words.len(), 2052);
        let mut sorted = words.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 2052);
        assert_eq!(WordSource::default().word(0), words[0]);
        assert!(words
            .iter()
            .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn loading_strips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Alpha\n\n  bravo  \r\n\ncharlie\n").unwrap();
        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(words, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn loading_rejects_empty_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n   \n").unwrap();
        assert!(matches!(
            load_wordlist(file.path()),
            Err(WordlistError::Empty(_))
        ));
    }

    #[test]
    fn loading_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(matches!(
            load_wordlist(&missing),
            Err(WordlistError::Io { .. })
        ));
    }
}
