//! One round: the target word, the attempt grid and the cursor
//!
//! A round is `Playing` until a row is all correct (`Won`) or the last row
//! fails (`Lost`). Once done the cursor's row index sits at
//! [`MAX_ATTEMPTS`], past the last row.

use crate::core::{Cell, CharStatusMap, Guess, WORD_LENGTH, Word, evaluate};
use crate::dictionary::{Dictionary, fold_char};
use serde::{Deserialize, Serialize};

/// Number of attempt rows per round
pub const MAX_ATTEMPTS: usize = 6;

/// Message shown when a submitted entry is not a dictionary word
pub const WORD_NOT_FOUND: &str = "word not found";

/// Active cell position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cursor {
    pub row_index: usize,
    pub cell_index: usize,
}

/// Lifecycle state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    Won,
    Lost,
}

impl RoundStatus {
    /// Won and lost are both done
    #[inline]
    #[must_use]
    pub const fn is_done(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// How a round resolved, as reported to the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Solved; `attempts` counts evaluated rows, starting at 1
    Won { attempts: usize },
    /// Every row used without solving
    Lost,
    /// Restarted while still playing
    Abandoned,
}

/// Result of submitting the active row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Row not full or round already done
    Ignored,
    /// Entry not in the dictionary; `last_error` is set
    NotFound,
    /// Row evaluated; `outcome` is set when this ended the round
    Evaluated {
        guess: Guess,
        outcome: Option<RoundOutcome>,
    },
}

/// A single playthrough
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    #[serde(alias = "word")]
    target_word: Word,
    guesses: [Guess; MAX_ATTEMPTS],
    #[serde(default)]
    cursor: Cursor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
    #[serde(default)]
    recorded: bool,
}

impl Round {
    /// Fresh round with an empty grid
    #[must_use]
    pub fn new(word: Word) -> Self {
        Self {
            target_word: word,
            guesses: Default::default(),
            cursor: Cursor::default(),
            last_error: None,
            recorded: false,
        }
    }

    /// The target word, canonical spelling
    #[inline]
    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.target_word
    }

    #[inline]
    #[must_use]
    pub const fn guesses(&self) -> &[Guess; MAX_ATTEMPTS] {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the history already counted this round
    #[inline]
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub(crate) fn mark_recorded(&mut self) {
        self.recorded = true;
    }

    /// Current lifecycle state, derived from the grid
    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.guesses.iter().any(Guess::is_complete) {
            RoundStatus::Won
        } else if self.cursor.row_index >= MAX_ATTEMPTS {
            RoundStatus::Lost
        } else {
            RoundStatus::Playing
        }
    }

    /// Number of evaluated rows
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.guesses.iter().filter(|g| g.is_evaluated()).count()
    }

    /// How the round ended, if it has
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.status() {
            RoundStatus::Playing => None,
            RoundStatus::Won => Some(RoundOutcome::Won {
                attempts: self.attempts(),
            }),
            RoundStatus::Lost => Some(RoundOutcome::Lost),
        }
    }

    /// The row being edited, if the round is still playing
    #[must_use]
    pub fn active_row(&self) -> Option<&Guess> {
        if self.status().is_done() {
            return None;
        }
        self.guesses.get(self.cursor.row_index)
    }

    fn active_row_mut(&mut self) -> Option<&mut Guess> {
        if self.status().is_done() {
            return None;
        }
        self.guesses.get_mut(self.cursor.row_index)
    }

    /// Clamp a cursor read from storage back into range
    pub(crate) fn sanitize(&mut self) {
        if self.guesses.iter().any(Guess::is_complete) {
            self.cursor.row_index = MAX_ATTEMPTS;
        }
        self.cursor.row_index = self.cursor.row_index.min(MAX_ATTEMPTS);
        self.cursor.cell_index = self.cursor.cell_index.min(WORD_LENGTH);
    }

    /// Write a letter at the cursor and advance
    ///
    /// The character is folded first (`Á` becomes `a`); anything that does
    /// not fold to `a..=z` is ignored, as is typing past the last cell.
    pub fn type_letter(&mut self, ch: char) -> bool {
        let ch = fold_char(ch);
        if !ch.is_ascii_lowercase() {
            return false;
        }

        let index = self.cursor.cell_index;
        if index >= WORD_LENGTH {
            return false;
        }
        let Some(row) = self.active_row_mut() else {
            return false;
        };

        row.set(index, Cell::typed(ch));
        self.cursor.cell_index += 1;
        self.last_error = None;
        true
    }

    /// Clear the cell before the cursor and move back
    pub fn backspace(&mut self) -> bool {
        let index = self.cursor.cell_index;
        if index == 0 {
            return false;
        }
        let Some(row) = self.active_row_mut() else {
            return false;
        };

        row.set(index - 1, Cell::default());
        self.cursor.cell_index -= 1;
        self.last_error = None;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.status().is_done() || self.cursor.cell_index == 0 {
            return false;
        }
        self.cursor.cell_index -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.status().is_done() || self.cursor.cell_index >= WORD_LENGTH - 1 {
            return false;
        }
        self.cursor.cell_index += 1;
        true
    }

    /// Put the cursor on a cell of the active row
    pub fn click_cell(&mut self, index: usize) -> bool {
        if self.status().is_done() || index >= WORD_LENGTH || self.cursor.cell_index == index {
            return false;
        }
        self.cursor.cell_index = index;
        true
    }

    /// Validate and evaluate the active row
    ///
    /// On success the row is replaced by the evaluated guess, its statuses
    /// are folded into `char_status` and the cursor moves to the next row or
    /// past the end when the round is over. An unknown word only sets
    /// `last_error`; the row and cursor stay as they were.
    pub fn submit(
        &mut self,
        dictionary: &Dictionary,
        char_status: &mut CharStatusMap,
    ) -> Submission {
        let Some(row) = self.active_row() else {
            return Submission::Ignored;
        };
        if !row.is_full() {
            return Submission::Ignored;
        }

        let Some(canonical) = dictionary.find_valid_word(&row.entry()) else {
            self.last_error = Some(WORD_NOT_FOUND.to_string());
            return Submission::NotFound;
        };

        let guess = evaluate(*canonical.folded(), &self.target_word, canonical);
        char_status.fold_guess(&guess);

        let row_index = self.cursor.row_index;
        self.guesses[row_index] = guess.clone();
        self.last_error = None;
        self.cursor.cell_index = 0;

        let outcome = if guess.is_complete() {
            self.cursor.row_index = MAX_ATTEMPTS;
            Some(RoundOutcome::Won {
                attempts: row_index + 1,
            })
        } else if row_index + 1 >= MAX_ATTEMPTS {
            self.cursor.row_index = MAX_ATTEMPTS;
            Some(RoundOutcome::Lost)
        } else {
            self.cursor.row_index = row_index + 1;
            None
        };

        Submission::Evaluated { guess, outcome }
    }
}
