//! TUI rendering with ratatui
//!
//! Board, on-screen keyboard and the game-end statistics panel.

use super::app::App;
use crate::core::{CharStatusMap, Guess, KEYBOARD_ROWS, Status, WORD_LENGTH};
use crate::game::{MAX_ATTEMPTS, Round, RoundStatus, Snapshot};
use crate::history::HistoryAggregate;
use crate::output::formatters::{display_word, distribution_bar};
use crate::store::KeyValueStore;
use rand::Rng;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
};

pub const TILE_WIDTH: u16 = 7;
pub const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;

pub const GRID_WIDTH: u16 = WORD_LENGTH as u16 * (TILE_WIDTH + TILE_GAP) - TILE_GAP;
pub const GRID_HEIGHT: u16 = MAX_ATTEMPTS as u16 * TILE_HEIGHT;

const KEY_GAP: u16 = 1;

const BAR_WIDTH: usize = 24;

/// One key of the on-screen keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCap {
    Letter(char),
    Backspace,
    Enter,
}

impl KeyCap {
    const fn width(self) -> u16 {
        match self {
            Self::Letter(_) => 3,
            Self::Backspace => 5,
            Self::Enter => 7,
        }
    }

    fn label(self) -> String {
        match self {
            Self::Letter(ch) => ch.to_ascii_uppercase().to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Enter => "ENTER".to_string(),
        }
    }

    /// Key code a click on this key stands for
    #[must_use]
    pub const fn key_code(self) -> KeyCode {
        match self {
            Self::Letter(ch) => KeyCode::Char(ch),
            Self::Backspace => KeyCode::Backspace,
            Self::Enter => KeyCode::Enter,
        }
    }
}

/// Clickable regions of the last drawn frame
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    /// Area occupied by the tiles
    pub grid: Rect,
    pub keys: Vec<(KeyCap, Rect)>,
}

/// Main UI rendering function
///
/// Returns where the tiles and keys were drawn, for mouse hit-testing.
pub fn ui<S: KeyValueStore, R: Rng>(f: &mut Frame, app: &App<S, R>) -> HitMap {
    let snapshot = app.session.snapshot();
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(GRID_HEIGHT + 2), // Board
            Constraint::Length(3),            // Error toast
            Constraint::Length(5),            // Keyboard
            Constraint::Length(1),            // Help line
        ])
        .split(area);

    render_header(f, chunks[0]);
    let grid = render_board(f, snapshot.round, chunks[1]);
    render_toast(f, snapshot.last_error, chunks[2]);
    let keys = render_keyboard(f, snapshot.chars_status, chunks[3]);
    render_help(f, snapshot.round, chunks[4]);

    if app.end_panel_open && snapshot.round.status().is_done() {
        render_end_panel(f, &snapshot, area);
    }

    HitMap { grid, keys }
}

/// Top-left corner of a tile
#[must_use]
pub fn cell_origin(grid: Rect, row: usize, cell: usize) -> (u16, u16) {
    let (row, cell) = (row as u16, cell as u16);
    (
        grid.x + cell * (TILE_WIDTH + TILE_GAP),
        grid.y + row * TILE_HEIGHT,
    )
}

/// Tile under a terminal position as `(row, cell)`
///
/// Positions on the gaps between tiles or outside the grid hit nothing.
#[must_use]
pub fn cell_at(grid: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    if column < grid.x || row < grid.y {
        return None;
    }
    let dx = column - grid.x;
    let dy = row - grid.y;
    if dx % (TILE_WIDTH + TILE_GAP) >= TILE_WIDTH {
        return None;
    }

    let cell = usize::from(dx / (TILE_WIDTH + TILE_GAP));
    let row = usize::from(dy / TILE_HEIGHT);
    (cell < WORD_LENGTH && row < MAX_ATTEMPTS).then_some((row, cell))
}

/// Background and foreground for a letter status
fn status_colors(status: Option<Status>) -> (Color, Color) {
    match status {
        Some(Status::Correct) => (Color::Green, Color::Black),
        Some(Status::WrongPlace) => (Color::Yellow, Color::Black),
        Some(Status::NotPresent) => (Color::DarkGray, Color::White),
        None => (Color::Reset, Color::White),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🟩 WORDLE")
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Green)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, round: &Round, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let grid = centered(inner, GRID_WIDTH, GRID_HEIGHT);
    let cursor = round.cursor();
    let playing = round.status() == RoundStatus::Playing;

    for (row, guess) in round.guesses().iter().enumerate() {
        for (index, cell) in guess.cells().iter().enumerate() {
            let (x, y) = cell_origin(grid, row, index);
            let tile = Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT).intersection(grid);
            if tile.is_empty() {
                continue;
            }

            let active = playing && row == cursor.row_index;
            let border = if active && index == cursor.cell_index {
                Style::default().fg(Color::Yellow)
            } else if active {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let (bg, fg) = status_colors(cell.status);
            let letter = cell.ch.map(|ch| ch.to_uppercase().to_string()).unwrap_or_default();
            let widget = Paragraph::new(letter)
                .alignment(Alignment::Center)
                .style(Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border),
                );
            f.render_widget(widget, tile);
        }
    }

    grid
}

fn render_toast(f: &mut Frame, last_error: Option<&str>, area: Rect) {
    let Some(message) = last_error else {
        return;
    };

    let toast = Paragraph::new(format!("❌ {message}"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Red)),
        );
    f.render_widget(toast, centered(area, 40, area.height));
}

/// QWERTY rows, Backspace closing the second row and Enter the third
fn keyboard_rows() -> [Vec<KeyCap>; 3] {
    let letters = |row: &str| row.chars().map(KeyCap::Letter).collect::<Vec<_>>();
    let mut rows = KEYBOARD_ROWS.map(letters);
    rows[1].push(KeyCap::Backspace);
    rows[2].push(KeyCap::Enter);
    rows
}

/// Position of every on-screen key, one centered row per line of `area`
#[must_use]
pub fn keyboard_layout(area: Rect) -> Vec<(KeyCap, Rect)> {
    let mut keys = Vec::new();

    for (line, row) in keyboard_rows().iter().enumerate() {
        let y = area.y + line as u16;
        if y >= area.bottom() {
            break;
        }

        let width = row.iter().map(|key| key.width() + KEY_GAP).sum::<u16>() - KEY_GAP;
        let mut x = area.x + area.width.saturating_sub(width) / 2;
        for &key in row {
            let rect = Rect::new(x, y, key.width(), 1).intersection(area);
            if !rect.is_empty() {
                keys.push((key, rect));
            }
            x += key.width() + KEY_GAP;
        }
    }

    keys
}

/// Key under a terminal position
#[must_use]
pub fn key_at(keys: &[(KeyCap, Rect)], column: u16, row: u16) -> Option<KeyCap> {
    keys.iter()
        .find(|(_, rect)| rect.contains(Position::new(column, row)))
        .map(|&(key, _)| key)
}

fn render_keyboard(
    f: &mut Frame,
    chars_status: &CharStatusMap,
    area: Rect,
) -> Vec<(KeyCap, Rect)> {
    let block = Block::default()
        .title(" Keyboard ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let keys = keyboard_layout(inner);
    for &(key, rect) in &keys {
        let (bg, fg) = match key {
            KeyCap::Letter(ch) => status_colors(chars_status.get(ch)),
            KeyCap::Backspace | KeyCap::Enter => (Color::Blue, Color::White),
        };
        let widget = Paragraph::new(key.label())
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg).fg(fg).add_modifier(Modifier::BOLD));
        f.render_widget(widget, rect);
    }

    keys
}

fn render_help(f: &mut Frame, round: &Round, area: Rect) {
    let text = if round.status().is_done() {
        "Enter: New Game | Esc: Close Panel | Ctrl-C: Quit"
    } else {
        "Enter: Submit | ←/→/Click: Move | Ctrl-R: Give Up | Esc: Quit"
    };
    let help = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}

fn outcome_lines(round: &Round) -> Vec<Line<'static>> {
    match round.status() {
        RoundStatus::Won => vec![Line::from(Span::styled(
            format!("🎉 Solved in {}/{MAX_ATTEMPTS}!", round.attempts()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))],
        RoundStatus::Lost => vec![Line::from(vec![
            Span::styled("The word was ", Style::default().fg(Color::Red)),
            Span::styled(
                display_word(round.word().text()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ])],
        RoundStatus::Playing => Vec::new(),
    }
}

fn distribution_lines(history: &HistoryAggregate) -> Vec<Line<'static>> {
    let max = history.max_bar();
    let mut lines: Vec<Line> = history
        .distribution()
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            Line::from(vec![
                Span::raw(format!("{} ", i + 1)),
                Span::styled(
                    distribution_bar(count, max, BAR_WIDTH),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(format!(" {count}")),
            ])
        })
        .collect();

    lines.push(Line::from(vec![
        Span::raw("☠ "),
        Span::styled(
            distribution_bar(history.defeats(), max, BAR_WIDTH),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!(" {}", history.defeats())),
    ]));
    lines
}

fn summary_line(guesses: &[Guess]) -> Line<'static> {
    let rows: Vec<String> = guesses
        .iter()
        .filter(|guess| guess.is_evaluated())
        .map(Guess::to_emoji)
        .collect();
    Line::from(rows.join(" "))
}

fn render_end_panel(f: &mut Frame, snapshot: &Snapshot<'_>, area: Rect) {
    let history = snapshot.history;
    let panel = centered(area, 46, 20);
    f.render_widget(Clear, panel);

    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Outcome and summary
            Constraint::Length(2), // Counters
            Constraint::Length(3), // Win rate gauge
            Constraint::Min(7),    // Distribution
        ])
        .split(inner);

    let mut outcome = outcome_lines(snapshot.round);
    outcome.push(summary_line(snapshot.round.guesses()));
    f.render_widget(
        Paragraph::new(outcome).alignment(Alignment::Center),
        chunks[0],
    );

    let counters = vec![
        Line::from(format!(
            "Games: {}   Streak: {}   Best: {}",
            history.total_rounds(),
            history.streak(),
            history.best_streak()
        )),
        Line::from(format!(
            "Won: {}   Lost: {}   Abandoned: {}",
            history.wins(),
            history.failures(),
            history.abandonments()
        )),
    ];
    f.render_widget(
        Paragraph::new(counters)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        chunks[1],
    );

    let percent = history.win_percentage().min(100);
    let gauge = Gauge::default()
        .block(Block::default().title(" Win % ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::try_from(percent).unwrap_or(100))
        .label(format!("{percent}%"));
    f.render_widget(gauge, chunks[2]);

    f.render_widget(
        Paragraph::new(distribution_lines(history)).style(Style::default().fg(Color::White)),
        chunks[3],
    );
}
