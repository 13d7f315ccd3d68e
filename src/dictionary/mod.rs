//! Dictionary of valid words
//!
//! Lookups ignore accents and case: a typed `razao` finds the canonical
//! `razão`, and the canonical spelling is what the grid shows afterwards.

mod embedded;
pub mod loader;
mod normalize;

pub use embedded::{WORDS, WORDS_COUNT};
pub use normalize::{fold_char, normalize};

use crate::core::{WORD_LENGTH, Word};
use rand::Rng;
use rand::prelude::IndexedRandom;

/// Static, ordered list of guessable words
///
/// Targets are drawn from the same list.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    #[must_use]
    pub const fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Dictionary compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(loader::words_from_slice(WORDS))
    }

    /// Build from string slices, skipping invalid entries
    #[must_use]
    pub fn from_strs(words: &[&str]) -> Self {
        Self::new(loader::words_from_slice(words))
    }

    /// Find the dictionary word a typed entry spells
    ///
    /// Returns the first word whose folded form equals the folded entry, or
    /// `None`. Entries that do not fold to exactly five letters never match.
    ///
    /// # Examples
    /// ```
    /// use wordle_play::dictionary::Dictionary;
    ///
    /// let dictionary = Dictionary::from_strs(&["razão", "verde"]);
    /// assert_eq!(dictionary.find_valid_word("razao").map(|w| w.text()), Some("razão"));
    /// assert!(dictionary.find_valid_word("razo").is_none());
    /// ```
    #[must_use]
    pub fn find_valid_word(&self, entry: &str) -> Option<&Word> {
        let folded = normalize(entry);
        if folded.chars().count() != WORD_LENGTH {
            return None;
        }

        self.words
            .iter()
            .find(|word| word.folded() == folded.as_bytes())
    }

    /// Pick a target word uniformly at random
    ///
    /// Returns `None` if the dictionary is empty.
    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Word> {
        self.words.choose(rng)
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
