//! TUI application state and event loop

use super::rendering::{self, HitMap};
use crate::game::{Input, RoundOutcome, Session};
use crate::store::KeyValueStore;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::Terminal;
use std::io;
use tracing::{debug, info};

/// Application state
pub struct App<S: KeyValueStore, R: Rng> {
    pub session: Session<S, R>,
    /// Game-end panel with statistics is visible
    pub end_panel_open: bool,
    pub should_quit: bool,
}

impl<S: KeyValueStore, R: Rng> App<S, R> {
    #[must_use]
    pub fn new(session: Session<S, R>) -> Self {
        let end_panel_open = session.state().round().status().is_done();
        Self {
            session,
            end_panel_open,
            should_quit: false,
        }
    }

    fn round_done(&self) -> bool {
        self.session.state().round().status().is_done()
    }

    fn apply(&mut self, input: Input) {
        let step = self.session.handle(input);
        match step.outcome {
            Some(RoundOutcome::Won { .. } | RoundOutcome::Lost) => self.end_panel_open = true,
            Some(RoundOutcome::Abandoned) => self.end_panel_open = false,
            None if step.changed && !self.round_done() => self.end_panel_open = false,
            None => {}
        }
    }

    /// Translate one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.apply(Input::Restart),
            KeyCode::Esc if self.round_done() && self.end_panel_open => {
                self.end_panel_open = false;
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.apply(Input::Enter),
            _ if self.round_done() => self.end_panel_open = true,
            KeyCode::Char(ch) if !ctrl => self.apply(Input::Letter(ch)),
            KeyCode::Backspace => self.apply(Input::Backspace),
            KeyCode::Left => self.apply(Input::ArrowLeft),
            KeyCode::Right => self.apply(Input::ArrowRight),
            _ => {}
        }
    }

    /// Translate one left click
    ///
    /// A click on an on-screen key acts like pressing it. A click on a cell
    /// of the active row moves the cursor there.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, hits: &HitMap) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.end_panel_open {
            return;
        }

        if let Some(key) = rendering::key_at(&hits.keys, mouse.column, mouse.row) {
            debug!(?key, "Key clicked");
            self.handle_key(KeyEvent::new(key.key_code(), KeyModifiers::NONE));
            return;
        }
        if self.round_done() {
            return;
        }

        let Some((row, cell)) = rendering::cell_at(hits.grid, mouse.column, mouse.row) else {
            return;
        };
        if row == self.session.state().round().cursor().row_index {
            debug!(cell, "Cell clicked");
            self.apply(Input::CellClick(cell));
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
pub fn run_tui<S: KeyValueStore, R: Rng>(app: App<S, R>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore, R: Rng>(
    terminal: &mut Terminal<B>,
    mut app: App<S, R>,
) -> Result<()> {
    info!("TUI started");
    let mut hits = HitMap::default();

    loop {
        terminal.draw(|f| hits = rendering::ui(f, &app))?;

        match event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, &hits),
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    info!("TUI closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::dictionary::Dictionary;
    use crate::game::{GAME_STATE_KEY, GameState, RoundStatus};
    use crate::interactive::KeyCap;
    use crate::store::{MemoryStore, save_record};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::layout::Rect;

    fn app(target: &str) -> App<MemoryStore, StdRng> {
        let mut store = MemoryStore::new();
        save_record(
            &mut store,
            GAME_STATE_KEY,
            &GameState::new(Word::new(target).unwrap()),
        )
        .unwrap();
        let session = Session::load(
            Dictionary::from_strs(&[target, "verde", "negro", "tigre"]),
            store,
            StdRng::seed_from_u64(9),
        )
        .unwrap();
        App::new(session)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_word(app: &mut App<MemoryStore, StdRng>, word: &str) {
        for ch in word.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        app.handle_key(key(KeyCode::Enter));
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn typing_and_submitting() {
        let mut app = app("verde");
        type_word(&mut app, "negro");

        let round = app.session.state().round();
        assert_eq!(round.attempts(), 1);
        assert_eq!(round.status(), RoundStatus::Playing);
        assert!(!app.end_panel_open);
    }

    #[test]
    fn win_opens_end_panel_and_enter_restarts() {
        let mut app = app("verde");
        type_word(&mut app, "verde");
        assert!(app.end_panel_open);
        assert_eq!(app.session.history().wins(), 1);

        app.handle_key(key(KeyCode::Enter));
        assert!(!app.end_panel_open);
        assert_eq!(app.session.state().round().status(), RoundStatus::Playing);
        assert_eq!(app.session.history().total_rounds(), 1);
    }

    #[test]
    fn esc_closes_panel_then_any_key_reopens() {
        let mut app = app("verde");
        type_word(&mut app, "verde");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.end_panel_open);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.end_panel_open);
        assert_eq!(app.session.state().round().attempts(), 1);
    }

    #[test]
    fn esc_while_playing_quits() {
        let mut app = app("verde");
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app("verde");
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);
        assert_eq!(app.session.state().round().cursor().cell_index, 0);
    }

    #[test]
    fn ctrl_r_abandons_round() {
        let mut app = app("verde");
        type_word(&mut app, "negro");
        app.handle_key(ctrl('r'));

        assert_eq!(app.session.history().abandonments(), 1);
        assert_eq!(app.session.state().round().attempts(), 0);
        assert!(!app.end_panel_open);
    }

    #[test]
    fn click_on_active_row_moves_cursor() {
        let mut app = app("verde");
        type_word(&mut app, "neg");
        let grid = Rect::new(0, 0, rendering::GRID_WIDTH, rendering::GRID_HEIGHT);
        let hits = HitMap {
            grid,
            keys: Vec::new(),
        };

        let (x, y) = rendering::cell_origin(grid, 0, 1);
        app.handle_mouse(click(x + 1, y + 1), &hits);
        assert_eq!(app.session.state().round().cursor().cell_index, 1);

        // Inactive row
        let (x, y) = rendering::cell_origin(grid, 3, 4);
        app.handle_mouse(click(x + 1, y + 1), &hits);
        assert_eq!(app.session.state().round().cursor().cell_index, 1);
    }

    fn keyboard_hits() -> HitMap {
        HitMap {
            grid: Rect::new(0, 0, rendering::GRID_WIDTH, rendering::GRID_HEIGHT),
            keys: rendering::keyboard_layout(Rect::new(0, 30, 60, 3)),
        }
    }

    fn click_key(app: &mut App<MemoryStore, StdRng>, hits: &HitMap, key: KeyCap) {
        let (_, rect) = hits
            .keys
            .iter()
            .find(|(cap, _)| *cap == key)
            .copied()
            .unwrap();
        app.handle_mouse(click(rect.x, rect.y), hits);
    }

    #[test]
    fn clicking_keyboard_types_and_submits() {
        let mut app = app("verde");
        let hits = keyboard_hits();

        for ch in "negrx".chars() {
            click_key(&mut app, &hits, KeyCap::Letter(ch));
        }
        click_key(&mut app, &hits, KeyCap::Backspace);
        assert_eq!(app.session.state().round().cursor().cell_index, 4);

        click_key(&mut app, &hits, KeyCap::Letter('o'));
        click_key(&mut app, &hits, KeyCap::Enter);
        assert_eq!(app.session.state().round().attempts(), 1);
        assert_eq!(app.session.state().round().guesses()[0].entry(), "negro");
    }

    #[test]
    fn keyboard_clicks_ignored_under_end_panel() {
        let mut app = app("verde");
        type_word(&mut app, "verde");
        assert!(app.end_panel_open);

        let hits = keyboard_hits();
        click_key(&mut app, &hits, KeyCap::Enter);
        assert_eq!(app.session.state().round().status(), RoundStatus::Won);
    }
}
