//! Guess evaluation against the target word
//!
//! Each letter of a submitted entry is classified as correct, in the wrong
//! place, or not present. Repeated letters are resolved against a pool of
//! target letters so no letter is credited more often than the target holds it.

use super::{Cell, Guess, Status, WORD_LENGTH, Word};

/// Evaluate a submitted entry against the target
///
/// `entry` is the accent-free letters the player submitted, `target` is the
/// round's word and `canonical` is the dictionary word the entry matched. The
/// returned cells carry the canonical spelling's letters.
///
/// # Algorithm
/// 1. First pass: mark exact position matches and claim them from the pool
/// 2. Second pass: for each unmarked position, claim the leftmost remaining
///    occurrence of the letter (wrong place) or mark it not present
///
/// # Examples
/// ```
/// use wordle_play::core::{Status, Word, evaluate};
///
/// let target = Word::new("apple").unwrap();
/// let guess = Word::new("close").unwrap();
/// let row = evaluate(*guess.folded(), &target, &guess);
///
/// // C and S are absent, L is claimed from APPLE's fourth letter, O is
/// // absent and E is exact
/// let statuses: Vec<_> = row.cells().iter().map(|c| c.status.unwrap()).collect();
/// assert_eq!(
///     statuses,
///     [
///         Status::NotPresent,
///         Status::WrongPlace,
///         Status::NotPresent,
///         Status::NotPresent,
///         Status::Correct,
///     ]
/// );
/// ```
#[must_use]
pub fn evaluate(entry: [u8; WORD_LENGTH], target: &Word, canonical: &Word) -> Guess {
    let mut remaining: [Option<u8>; WORD_LENGTH] = (*target.folded()).map(Some);
    let mut result: [Option<Status>; WORD_LENGTH] = [None; WORD_LENGTH];

    // First pass: exact matches
    for (i, letter) in entry.into_iter().enumerate() {
        if remaining[i] == Some(letter) {
            remaining[i] = None;
            result[i] = Some(Status::Correct);
        }
    }

    // Second pass: letters present elsewhere
    for (i, letter) in entry.into_iter().enumerate() {
        if result[i].is_some() {
            continue;
        }

        let claimed = remaining
            .iter_mut()
            .find(|slot| **slot == Some(letter))
            .map(Option::take);

        result[i] = Some(if claimed.is_some() {
            Status::WrongPlace
        } else {
            Status::NotPresent
        });
    }

    let letters = canonical.letters();
    let mut cells = [Cell::default(); WORD_LENGTH];
    for (i, cell) in cells.iter_mut().enumerate() {
        // Fall back to the plain letter if the spelling does not split into
        // one char per position
        let ch = letters
            .get(i)
            .copied()
            .filter(|_| letters.len() == WORD_LENGTH)
            .unwrap_or(char::from(entry[i]));
        *cell = Cell {
            ch: Some(ch),
            status: result[i],
        };
    }

    Guess::from_cells(cells)
}
