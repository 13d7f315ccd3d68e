//! Simple interactive CLI mode
//!
//! Line-based game without the TUI: type a whole word per line.

use crate::core::WORD_LENGTH;
use crate::dictionary::normalize;
use crate::game::{Input, RoundStatus, Session};
use crate::output::{print_board, print_round_end};
use crate::store::KeyValueStore;
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// What a line of player input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Restart,
    Guess(String),
    Invalid(String),
}

fn parse_line(line: &str) -> Command {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "n" | "restart" => Command::Restart,
        _ => {
            let folded = normalize(line);
            if folded.chars().count() == WORD_LENGTH
                && folded.chars().all(|c| c.is_ascii_lowercase())
            {
                Command::Guess(line.to_string())
            } else {
                Command::Invalid(format!("Enter a {WORD_LENGTH}-letter word"))
            }
        }
    }
}

/// Overwrite the active row with `word` and submit it
fn submit_word<S: KeyValueStore, R: Rng>(session: &mut Session<S, R>, word: &str) {
    session.handle(Input::CellClick(0));
    for ch in word.chars() {
        session.handle(Input::Letter(ch));
    }
    session.handle(Input::Enter);
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading from stdin or writing to stdout fails.
pub fn run_simple<S: KeyValueStore, R: Rng>(session: &mut Session<S, R>) -> io::Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Wordle - Simple Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Guess the {WORD_LENGTH}-letter word. Accents are optional.");
    println!("Commands: 'new' to give up and restart, 'quit' to exit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let snapshot = session.snapshot();
        let round = snapshot.round;

        if round.status().is_done() {
            print_round_end(round);
            print!("\nPlay again? (yes/no): ");
            io::stdout().flush()?;

            let Some(answer) = lines.next().transpose()? else {
                return Ok(());
            };
            if matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
                session.handle(Input::Enter);
                println!("\n🔄 New game started!\n");
                continue;
            }
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        }

        print_board(round);
        print!("Guess {}: ", round.cursor().row_index + 1);
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        match parse_line(&line) {
            Command::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Command::Restart => {
                session.handle(Input::Restart);
                println!("\n🔄 New game started!\n");
            }
            Command::Invalid(message) => println!("{}", message.red()),
            Command::Guess(word) => {
                submit_word(session, &word);
                if let Some(error) = session.snapshot().last_error {
                    println!("{}", format!("❌ {error}").red());
                } else if session.snapshot().round.status() == RoundStatus::Playing {
                    println!();
                }
            }
        }
    }
}
