//! Grid cells, letter statuses and guess rows

use super::WORD_LENGTH;
use serde::{Deserialize, Serialize};

/// How well a letter matched the target word
///
/// Ordered from worst to best so the keyboard can keep the maximum seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Letter not available to claim in the target
    NotPresent,
    /// Letter is in the target at another position
    WrongPlace,
    /// Letter is in the right position
    Correct,
}

impl Status {
    /// Square used in result summaries
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::WrongPlace => '🟨',
            Self::NotPresent => '⬜',
        }
    }
}

/// One letter slot
///
/// A cell without a status has not been evaluated yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cell {
    #[serde(rename = "char")]
    pub ch: Option<char>,
    pub status: Option<Status>,
}

impl Cell {
    #[must_use]
    pub const fn typed(ch: char) -> Self {
        Self {
            ch: Some(ch),
            status: None,
        }
    }

    #[must_use]
    pub const fn evaluated(ch: char, status: Status) -> Self {
        Self {
            ch: Some(ch),
            status: Some(status),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.ch.is_some()
    }
}

/// A row of the grid: in-progress input or an evaluated attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guess {
    cells: [Cell; WORD_LENGTH],
}

impl Guess {
    #[must_use]
    pub const fn from_cells(cells: [Cell; WORD_LENGTH]) -> Self {
        Self { cells }
    }

    #[inline]
    #[must_use]
    pub const fn cells(&self) -> &[Cell; WORD_LENGTH] {
        &self.cells
    }

    /// Get the cell at a position, if in range
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Number of cells holding a letter
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// True when every cell holds a letter
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled() == WORD_LENGTH
    }

    /// True once the row carries evaluation results
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.cells.iter().all(|cell| cell.status.is_some())
    }

    /// A guess is complete when every cell is correct
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.status == Some(Status::Correct))
    }

    /// Letters typed so far, in order, skipping gaps
    #[must_use]
    pub fn entry(&self) -> String {
        self.cells.iter().filter_map(|cell| cell.ch).collect()
    }

    /// Render the statuses as a row of squares
    ///
    /// Unevaluated cells render as blanks.
    ///
    /// # Examples
    /// ```
    /// use wordle_play::core::{Cell, Guess, Status};
    ///
    /// let guess = Guess::from_cells([
    ///     Cell::evaluated('c', Status::Correct),
    ///     Cell::evaluated('r', Status::WrongPlace),
    ///     Cell::evaluated('a', Status::NotPresent),
    ///     Cell::evaluated('n', Status::Correct),
    ///     Cell::evaluated('e', Status::WrongPlace),
    /// ]);
    /// assert_eq!(guess.to_emoji(), "🟩🟨⬜🟩🟨");
    /// ```
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.status.map_or(' ', Status::emoji))
            .collect()
    }
}
