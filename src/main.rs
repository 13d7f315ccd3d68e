//! Wordle Play - CLI
//!
//! Wordle with TUI and line modes, persistent rounds and statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::ThreadRng;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordle_play::{
    commands::{reset_stats, run_simple, show_stats},
    dictionary::{Dictionary, loader::load_from_file},
    game::Session,
    interactive::{App, run_tui},
    store::FileStore,
};

#[derive(Parser)]
#[command(
    name = "wordle_play",
    about = "Guess the five-letter word in six tries; accents optional",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Wordlist: 'all' (default, embedded list) or path to file
    #[arg(short = 'w', long, global = true, default_value = "all")]
    wordlist: String,

    /// Directory holding saved game state and statistics
    #[arg(
        short = 'd',
        long,
        global = true,
        env = "WORDLE_PLAY_DATA_DIR",
        default_value = ".wordle_play"
    )]
    data_dir: PathBuf,

    /// Log file for TUI mode (default: a log file inside the data directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (type whole words, no TUI)
    Simple,

    /// Show win/loss statistics
    Stats,

    /// Delete all statistics
    ResetStats,
}

/// Load the dictionary based on the -w flag
fn load_dictionary(wordlist_mode: &str) -> Result<Dictionary> {
    if wordlist_mode == "all" {
        return Ok(Dictionary::embedded());
    }

    let words = load_from_file(wordlist_mode)
        .with_context(|| format!("Failed to read wordlist {wordlist_mode}"))?;
    Ok(Dictionary::new(words))
}

/// Install the tracing subscriber
///
/// The TUI owns the terminal, so it logs to a file; everything else logs to
/// stderr.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn open_session(cli: &Cli, store: FileStore) -> Result<Session<FileStore, ThreadRng>> {
    let dictionary = load_dictionary(&cli.wordlist)?;
    info!(words = dictionary.len(), "Dictionary loaded");
    Ok(Session::load(dictionary, store, rand::rng())?)
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);

    let store = FileStore::open(&cli.data_dir)
        .with_context(|| format!("Failed to open data directory {}", cli.data_dir.display()))?;

    let log_file = match command {
        Commands::Play => Some(
            cli.log_file
                .clone()
                .unwrap_or_else(|| cli.data_dir.join("wordle_play.log")),
        ),
        _ => cli.log_file.clone(),
    };
    init_tracing(log_file.as_deref())?;

    match command {
        Commands::Play => run_play_command(&cli, store),
        Commands::Simple => run_simple_command(&cli, store),
        Commands::Stats => {
            show_stats(&store);
            Ok(())
        }
        Commands::ResetStats => {
            let mut store = store;
            reset_stats(&mut store)?;
            println!("Statistics cleared.");
            Ok(())
        }
    }
}

fn run_simple_command(cli: &Cli, store: FileStore) -> Result<()> {
    let mut session = open_session(cli, store)?;
    run_simple(&mut session).map_err(|e| anyhow::anyhow!(e))
}

fn run_play_command(cli: &Cli, store: FileStore) -> Result<()> {
    let session = open_session(cli, store)?;
    run_tui(App::new(session))
}
