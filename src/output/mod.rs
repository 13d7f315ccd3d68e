//! Terminal output formatting
//!
//! Display utilities for the line-mode game and the stats command.

pub mod display;
pub mod formatters;

pub use display::{format_guess, print_board, print_history, print_round_end};
