//! Dictionary word representation
//!
//! A Word keeps the canonical spelling from the dictionary (accents included)
//! next to its folded form, which is what guesses are compared against.

use crate::dictionary::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Number of letters in every word
pub const WORD_LENGTH: usize = 5;

/// A 5-letter word with its accent-free lowercase form
///
/// Serializes as its canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    text: String,
    folded: [u8; WORD_LENGTH],
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be exactly {WORD_LENGTH} letters, got {0}")]
    InvalidLength(usize),
    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from its canonical spelling
    ///
    /// The spelling is lowercased but keeps its diacritics; the folded form
    /// must be exactly five ASCII letters.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The folded length is not exactly 5
    /// - The folded form contains anything other than `a..=z`
    ///
    /// # Examples
    /// ```
    /// use wordle_play::core::Word;
    ///
    /// let word = Word::new("Órgão").unwrap();
    /// assert_eq!(word.text(), "órgão");
    /// assert_eq!(word.folded(), b"orgao");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().trim().to_lowercase().nfc().collect();
        let folded = normalize(&text);

        let length = folded.chars().count();
        if length != WORD_LENGTH {
            return Err(WordError::InvalidLength(length));
        }

        if !folded.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters);
        }

        let folded: [u8; WORD_LENGTH] = folded
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidCharacters)?;

        Ok(Self { text, folded })
    }

    /// The canonical spelling, as listed in the dictionary
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The accent-free lowercase letters
    #[inline]
    #[must_use]
    pub const fn folded(&self) -> &[u8; WORD_LENGTH] {
        &self.folded
    }

    /// The canonical letters in order, one `char` per cell
    #[must_use]
    pub fn letters(&self) -> Vec<char> {
        self.text.chars().collect()
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
