//! Core domain types for the game
//!
//! Words, grid cells and the pure evaluation logic. Nothing here touches
//! input devices or storage.

mod cell;
mod evaluate;
mod keyboard;
mod word;

pub use cell::{Cell, Guess, Status};
pub use evaluate::evaluate;
pub use keyboard::{CharStatusMap, KEYBOARD_ROWS};
pub use word::{WORD_LENGTH, Word, WordError};
