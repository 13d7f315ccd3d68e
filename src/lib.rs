//! Wordle Play
//!
//! Single-player Wordle with accent-insensitive guessing, persistent game
//! state and win/loss statistics.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_play::core::{Status, Word, evaluate};
//!
//! let target = Word::new("razão").unwrap();
//! let guess = Word::new("razao").unwrap();
//!
//! // Entries are compared on their unaccented form
//! let row = evaluate(*guess.folded(), &target, &target);
//! assert!(row.cells().iter().all(|cell| cell.status == Some(Status::Correct)));
//! ```

// Core domain types
pub mod core;

// Word list and accent folding
pub mod dictionary;

// Round state machine and session
pub mod game;

// Cross-round statistics
pub mod history;

// Key-value persistence
pub mod store;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
