//! Reading custom word lists
//!
//! One word per line. Blank lines and `#` comments are ignored, duplicates
//! keep their first position, and entries that are not five ASCII letters
//! are skipped with a debug log.

use crate::core::Word;
use log::debug;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Read a word list from disk
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use wordle_duel::wordlists::loader::load_from_file;
///
/// let words = load_from_file("my_words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let path = path.as_ref();
    let words = words_from_lines(&fs::read_to_string(path)?);
    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Parse a newline-separated list
#[must_use]
pub fn words_from_lines(content: &str) -> Vec<Word> {
    let entries = content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|entry| !entry.is_empty());
    collect_unique(entries)
}

/// Convert an embedded list
///
/// # Examples
/// ```
/// use wordle_duel::wordlists::loader::words_from_slice;
/// use wordle_duel::wordlists::ANSWERS;
///
/// assert_eq!(words_from_slice(ANSWERS).len(), ANSWERS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    collect_unique(slice.iter().copied())
}

fn collect_unique<'s>(entries: impl Iterator<Item = &'s str>) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    let mut skipped = 0usize;
    let mut words = Vec::new();

    for entry in entries {
        match Word::new(entry) {
            Ok(word) if seen.insert(word.clone()) => words.push(word),
            Ok(_) => {}
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!("Skipped {skipped} entries that are not 5-letter words");
    }
    words
}
