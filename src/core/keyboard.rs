//! Best-seen status per letter, used to color the on-screen keyboard

use super::{Guess, Status};
use crate::dictionary::fold_char;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Keyboard rows in display order
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Letter to best status seen so far in the current round
///
/// Statuses only move up (`NotPresent < WrongPlace < Correct`); entries are
/// never removed. The map is a pure fold over the evaluated rows, so it can be
/// rebuilt with [`CharStatusMap::from_guesses`] at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharStatusMap(FxHashMap<char, Status>);

impl CharStatusMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the map from a round's rows
    ///
    /// Rows that have not been evaluated contribute nothing.
    #[must_use]
    pub fn from_guesses<'a>(guesses: impl IntoIterator<Item = &'a Guess>) -> Self {
        let mut map = Self::new();
        for guess in guesses {
            map.fold_guess(guess);
        }
        map
    }

    /// Raise a letter's status to at least `status`
    pub fn upgrade(&mut self, letter: char, status: Status) {
        let entry = self.0.entry(letter).or_insert(Status::NotPresent);
        *entry = (*entry).max(status);
    }

    /// Fold every evaluated cell of a row, in cell order
    ///
    /// Letters are keyed by their accent-free form so `ã` colors the `a` key.
    pub fn fold_guess(&mut self, guess: &Guess) {
        for cell in guess.cells() {
            if let (Some(ch), Some(status)) = (cell.ch, cell.status) {
                self.upgrade(fold_char(ch), status);
            }
        }
    }

    /// Best status seen for a letter, if any
    #[must_use]
    pub fn get(&self, letter: char) -> Option<Status> {
        self.0.get(&letter).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
