//! Colored printing for the line-mode game and the stats command

use super::formatters::{display_word, distribution_bar};
use crate::core::{Guess, Status};
use crate::game::{MAX_ATTEMPTS, Round, RoundStatus};
use crate::history::HistoryAggregate;
use colored::{ColoredString, Colorize};

fn colored_letter(ch: char, status: Option<Status>) -> ColoredString {
    let text = format!(" {} ", ch.to_uppercase());
    match status {
        Some(Status::Correct) => text.black().on_green().bold(),
        Some(Status::WrongPlace) => text.black().on_yellow().bold(),
        Some(Status::NotPresent) => text.white().on_bright_black(),
        None => text.normal(),
    }
}

/// Render one evaluated row as colored tiles
#[must_use]
pub fn format_guess(guess: &Guess) -> String {
    guess
        .cells()
        .iter()
        .map(|cell| colored_letter(cell.ch.unwrap_or(' '), cell.status).to_string())
        .collect()
}

/// Print every evaluated row of a round
pub fn print_board(round: &Round) {
    for (i, guess) in round
        .guesses()
        .iter()
        .enumerate()
        .filter(|(_, guess)| guess.is_evaluated())
    {
        println!("  {}. {}", (i + 1).to_string().bright_black(), format_guess(guess));
    }
}

/// Print the end-of-round message with the emoji summary
pub fn print_round_end(round: &Round) {
    println!();
    match round.status() {
        RoundStatus::Won => {
            let attempts = round.attempts();
            println!(
                "{}",
                format!(
                    "🎉 Solved in {attempts} {}!",
                    if attempts == 1 { "guess" } else { "guesses" }
                )
                .green()
                .bold()
            );
        }
        RoundStatus::Lost => {
            println!(
                "{} {}",
                "❌ The word was".red().bold(),
                display_word(round.word().text()).bright_yellow().bold()
            );
        }
        RoundStatus::Playing => return,
    }

    println!();
    for guess in round.guesses().iter().filter(|g| g.is_evaluated()) {
        println!("  {}", guess.to_emoji());
    }
}

/// Print the history aggregate with a distribution chart
pub fn print_history(history: &HistoryAggregate) {
    println!("\n{}", "═".repeat(50).cyan());
    println!(" {} ", "STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(50).cyan());

    println!("\n   Played:        {}", history.total_rounds());
    println!(
        "   Win rate:      {}",
        format!("{}%", history.win_percentage()).bright_yellow().bold()
    );
    println!("   Streak:        {}", history.streak());
    println!("   Best streak:   {}", history.best_streak());

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let max = history.max_bar();
    for (i, count) in history.distribution().into_iter().enumerate() {
        println!(
            "   {}: {} {count:4}",
            i + 1,
            distribution_bar(count, max, 30).green()
        );
    }
    println!(
        "   ☠: {} {:4}",
        distribution_bar(history.defeats(), max, 30).yellow(),
        history.defeats()
    );
    println!(
        "\n   {} lost, {} abandoned, {MAX_ATTEMPTS} attempts per round",
        history.failures(),
        history.abandonments()
    );
}
