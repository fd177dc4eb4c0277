//! `word_list`: load and prepare the words a grid must contain.
//!
//! The solver expects a prepared word set:
//! - every word uppercase ASCII letters only,
//! - no duplicates,
//! - no word that is a literal substring of another included word (its path would
//!   already exist inside the longer word's path, so it is redundant work).
//!
//! Like the rest of the crate this module is **WASM-friendly**: `parse_from_str` never
//! touches the filesystem, and `load_from_path` only exists on native builds.

use crate::errors::WordError;
use crate::rune::RuneChar;
use log::debug;

/// A prepared, ready-to-solve word set.
///
/// `words` is ordered longest first, then alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    /// Example: `["BIRD", "CAT", "DOG"]`
    pub words: Vec<String>,
}

/// Trim and uppercase a single word, rejecting anything but letters.
pub(crate) fn normalize_word(raw: &str) -> Result<String, Box<WordError>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Box::new(WordError::EmptyWord));
    }

    trimmed
        .chars()
        .map(|c| {
            c.to_rune().ok_or_else(|| {
                Box::new(WordError::InvalidCharacter {
                    word: trimmed.to_string(),
                    invalid_char: c,
                })
            })
        })
        .collect()
}

/// Drop duplicates and words contained in a longer word that is kept.
fn prune_redundant(mut words: Vec<String>) -> Vec<String> {
    // dedup() only removes adjacent duplicates
    words.sort();
    words.dedup();

    // Longest first, so a word is only ever compared against words that could contain it.
    words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut kept: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        if let Some(container) = kept.iter().find(|k| k.contains(word.as_str())) {
            debug!("dropping {word}: already contained in {container}");
            continue;
        }
        kept.push(word);
    }
    kept
}

impl WordList {
    /// Build a word list from caller-supplied words.
    ///
    /// # Errors
    ///
    /// Returns a [`WordError`] for the first empty word or word with a non-letter
    /// character.
    pub fn from_words<I, S>(words: I) -> Result<WordList, Box<WordError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WordList { words: prune_redundant(normalized) })
    }

    /// Parse a raw word list from an in-memory string.
    ///
    /// Each line holds a word, optionally followed by `;score`. Blank lines, lines
    /// whose score does not parse, words scoring below `min_score` and words with
    /// non-letter characters are skipped.
    pub fn parse_from_str(contents: &str, min_score: i32) -> WordList {
        let words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    return None;
                }

                let word_raw = match line.split_once(';') {
                    Some((word_raw, score_raw)) => {
                        let score: i32 = score_raw.trim().parse().ok()?;
                        if score < min_score {
                            return None;
                        }
                        word_raw
                    }
                    None => line,
                };

                match normalize_word(word_raw) {
                    Ok(word) => Some(word),
                    Err(e) => {
                        debug!("skipping word-list line \"{line}\": {e}");
                        None
                    }
                }
            })
            .collect();

        WordList { words: prune_redundant(words) }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_score: i32,
    ) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e)
            )
        })?;

        Ok(Self::parse_from_str(&data, min_score))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
