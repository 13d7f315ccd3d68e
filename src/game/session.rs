//! The active game session
//!
//! Owns the dictionary, the round, the history and the store. Every input is
//! handled as load → step → store: the step mutates in-memory state, then the
//! changed records are written back before the next input is accepted.

use super::input::Input;
use super::round::{Round, RoundOutcome};
use super::state::{GameState, Step};
use crate::core::CharStatusMap;
use crate::dictionary::Dictionary;
use crate::history::HistoryAggregate;
use crate::store::{KeyValueStore, load_or_default, load_record, save_record};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Store key of the round record
pub const GAME_STATE_KEY: &str = "game_state";

/// Store key of the history record
pub const HISTORY_STATE_KEY: &str = "history_state";

/// Errors creating a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the dictionary has no words to choose a target from")]
    EmptyDictionary,
}

/// Read-only view handed to the presentation layer after each input
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub round: &'a Round,
    pub chars_status: &'a CharStatusMap,
    pub history: &'a HistoryAggregate,
    pub last_error: Option<&'a str>,
}

/// One player's game, bound to a store
pub struct Session<S: KeyValueStore, R: Rng> {
    dictionary: Dictionary,
    store: S,
    rng: R,
    state: GameState,
    history: HistoryAggregate,
}

impl<S: KeyValueStore, R: Rng> Session<S, R> {
    /// Load the session from `store`
    ///
    /// Missing or corrupt records start fresh. A stored round whose target is
    /// not a valid word is replaced by a new one. A finished round that the
    /// history never counted (for example after a crash between the two
    /// writes) is counted now, once.
    ///
    /// # Errors
    /// Returns `SessionError::EmptyDictionary` if there is no word to play.
    #[instrument(skip_all, fields(words = dictionary.len()))]
    pub fn load(dictionary: Dictionary, store: S, mut rng: R) -> Result<Self, SessionError> {
        let Some(first_word) = dictionary.random_word(&mut rng).cloned() else {
            return Err(SessionError::EmptyDictionary);
        };

        let history: HistoryAggregate = load_or_default(&store, HISTORY_STATE_KEY);
        let state = if let Some(mut state) = load_record::<GameState, _>(&store, GAME_STATE_KEY) {
            state.sanitize();
            debug!(status = ?state.round.status(), "Restored round");
            state
        } else {
            info!("Starting a new round");
            GameState::new(first_word)
        };

        let mut session = Self {
            dictionary,
            store,
            rng,
            state,
            history,
        };

        if let Some(outcome) = session.unrecorded_outcome() {
            warn!(?outcome, "Counting finished round missing from history");
            session.record(outcome);
            session.save_history();
        }
        session.save_state();

        Ok(session)
    }

    fn unrecorded_outcome(&self) -> Option<RoundOutcome> {
        if self.state.round.is_recorded() {
            return None;
        }
        self.state.round.outcome()
    }

    /// Apply one input and persist whatever changed
    #[instrument(skip(self))]
    pub fn handle(&mut self, input: Input) -> Step {
        let step = self.state.step(input, &self.dictionary, &mut self.rng);
        if !step.changed {
            return step;
        }

        match step.outcome {
            // Counted only once the replacement round is stored
            Some(RoundOutcome::Abandoned) => {
                if self.save_state() {
                    info!("Round abandoned");
                    self.record(RoundOutcome::Abandoned);
                    self.save_history();
                } else {
                    warn!("Abandonment not counted, the new round was not stored");
                }
            }
            Some(outcome) => {
                info!(?outcome, "Round resolved");
                self.record(outcome);
                self.save_history();
                self.save_state();
            }
            None => {
                self.save_state();
            }
        }

        step
    }

    /// Parse a key name and apply it; unknown keys are ignored
    pub fn handle_key(&mut self, key: &str) -> Step {
        Input::from_key(key).map_or_else(Step::default, |input| self.handle(input))
    }

    /// Count an outcome in the history
    ///
    /// A win or loss belongs to the current round, which is marked so it is
    /// never counted again. An abandonment belongs to the round that was just
    /// replaced.
    fn record(&mut self, outcome: RoundOutcome) {
        self.history.record(outcome);
        if !matches!(outcome, RoundOutcome::Abandoned) {
            self.state.round.mark_recorded();
        }
    }

    fn save_state(&mut self) -> bool {
        match save_record(&mut self.store, GAME_STATE_KEY, &self.state) {
            Ok(()) => true,
            Err(err) => {
                error!(%err, "Failed to save round");
                false
            }
        }
    }

    fn save_history(&mut self) {
        if let Err(err) = save_record(&mut self.store, HISTORY_STATE_KEY, &self.history) {
            error!(%err, "Failed to save history");
        }
    }

    /// Everything needed to draw the game
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            round: &self.state.round,
            chars_status: &self.state.chars_status,
            history: &self.history,
            last_error: self.state.round.last_error(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &HistoryAggregate {
        &self.history
    }

    #[inline]
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Status, WORD_LENGTH};
    use crate::game::round::{MAX_ATTEMPTS, RoundStatus, WORD_NOT_FOUND};
    use crate::store::{MemoryStore, StoreError};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    type TestSession = Session<MemoryStore, StdRng>;

    fn single_word(word: &str) -> Dictionary {
        Dictionary::from_strs(&[word, "close", "pleat", "crane", "slate"])
    }

    fn session_with(store: MemoryStore, target: &str) -> TestSession {
        // Seed a stored round so the target is known
        let mut store = store;
        let state = GameState::new(crate::core::Word::new(target).unwrap());
        save_record(&mut store, GAME_STATE_KEY, &state).unwrap();
        Session::load(single_word(target), store, StdRng::seed_from_u64(3)).unwrap()
    }

    fn session_with_store(store: MemoryStore) -> TestSession {
        Session::load(single_word("apple"), store, StdRng::seed_from_u64(7)).unwrap()
    }

    fn enter(session: &mut TestSession, word: &str) -> Step {
        for ch in word.chars() {
            session.handle(Input::Letter(ch));
        }
        session.handle(Input::Enter)
    }

    #[test]
    fn empty_dictionary_is_an_error() {
        let result = Session::load(
            Dictionary::new(Vec::new()),
            MemoryStore::new(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(SessionError::EmptyDictionary)));
    }

    #[test]
    fn fresh_store_starts_playing_and_saves_round() {
        let session = Session::load(
            single_word("apple"),
            MemoryStore::new(),
            StdRng::seed_from_u64(1),
        )
        .unwrap();

        assert_eq!(session.snapshot().round.status(), RoundStatus::Playing);
        assert!(session.store().get(GAME_STATE_KEY).unwrap().is_some());
        assert_eq!(session.history().total_rounds(), 0);
    }

    #[test]
    fn corrupt_records_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(GAME_STATE_KEY, "garbage").unwrap();
        store.set(HISTORY_STATE_KEY, "[1, 2").unwrap();

        let session = Session::load(single_word("apple"), store, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(session.snapshot().round.attempts(), 0);
        assert_eq!(session.history(), &HistoryAggregate::new());
    }

    #[test]
    fn win_is_recorded_once_and_persisted() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "close");
        let step = enter(&mut session, "apple");

        assert_eq!(step.outcome, Some(RoundOutcome::Won { attempts: 2 }));
        assert_eq!(session.history().successes(2), 1);
        assert_eq!(session.history().streak(), 1);
        assert!(session.snapshot().round.is_recorded());

        let stored: HistoryAggregate = load_or_default(session.store(), HISTORY_STATE_KEY);
        assert_eq!(&stored, session.history());
    }

    #[test]
    fn reloading_finished_round_does_not_double_count() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "apple");
        let store = session.store().clone();

        let reloaded =
            Session::load(single_word("apple"), store, StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(reloaded.history().total_rounds(), 1);
        assert_eq!(reloaded.snapshot().round.status(), RoundStatus::Won);
    }

    #[test]
    fn finished_round_missing_from_history_is_counted_on_load() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "apple");

        // Simulate a crash before the history write landed
        let mut store = session.store().clone();
        store.remove(HISTORY_STATE_KEY).unwrap();
        let mut raw: serde_json::Value =
            serde_json::from_str(&store.get(GAME_STATE_KEY).unwrap().unwrap()).unwrap();
        raw["round"]["recorded"] = false.into();
        store.set(GAME_STATE_KEY, &raw.to_string()).unwrap();

        let reloaded =
            Session::load(single_word("apple"), store, StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(reloaded.history().successes(1), 1);
        assert!(reloaded.snapshot().round.is_recorded());

        let again = Session::load(
            single_word("apple"),
            reloaded.store().clone(),
            StdRng::seed_from_u64(9),
        )
        .unwrap();
        assert_eq!(again.history().total_rounds(), 1);
    }

    #[test]
    fn loss_resets_streak() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "apple");
        session.handle(Input::Enter);

        // Force a known target for the second round
        let store = session.store().clone();
        let mut session = session_with(store, "apple");
        for _ in 0..MAX_ATTEMPTS {
            enter(&mut session, "crane");
        }

        assert_eq!(session.snapshot().round.status(), RoundStatus::Lost);
        assert_eq!(session.history().failures(), 1);
        assert_eq!(session.history().streak(), 0);
        assert_eq!(session.history().best_streak(), 1);
    }

    #[test]
    fn win_loss_abandon_sequence() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "close");
        enter(&mut session, "pleat");
        enter(&mut session, "apple");

        let mut session = session_with(session.store().clone(), "apple");
        for _ in 0..MAX_ATTEMPTS {
            enter(&mut session, "crane");
        }

        session.handle(Input::Enter);
        let step = session.handle(Input::Restart);
        assert_eq!(step.outcome, Some(RoundOutcome::Abandoned));

        let history = session.history();
        assert_eq!(history.total_rounds(), 3);
        assert_eq!(history.streak(), 0);
        assert!(history.best_streak() >= 1);
        assert_eq!(history.successes(3), 1);
    }

    #[test]
    fn abandonment_does_not_mark_new_round() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "close");
        session.handle(Input::Restart);

        assert_eq!(session.history().abandonments(), 1);
        assert!(!session.snapshot().round.is_recorded());
        assert_eq!(session.snapshot().round.attempts(), 0);
    }

    #[test]
    fn unknown_word_keeps_grid_and_cursor() {
        let mut session = session_with(MemoryStore::new(), "apple");
        for ch in "qqqqq".chars() {
            session.handle(Input::Letter(ch));
        }
        let before = session.snapshot().round.clone();

        session.handle(Input::Enter);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.last_error, Some(WORD_NOT_FOUND));
        assert_eq!(snapshot.round.cursor(), before.cursor());
        assert_eq!(snapshot.round.guesses(), before.guesses());
        assert_eq!(snapshot.round.cursor().cell_index, WORD_LENGTH);
    }

    #[test]
    fn keyboard_map_is_persisted_with_round() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "close");

        let reloaded = Session::load(
            single_word("apple"),
            session.store().clone(),
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(
            reloaded.snapshot().chars_status.get('e'),
            Some(Status::Correct)
        );
        assert_eq!(reloaded.snapshot().round.cursor().row_index, 1);
    }

    #[test]
    fn handle_key_ignores_unknown_keys() {
        let mut session = session_with(MemoryStore::new(), "apple");
        assert_eq!(session.handle_key("Shift"), Step::default());
        assert!(session.handle_key("a").changed);
        assert!(session.handle_key("Backspace").changed);
    }

    /// Memory store whose round writes fail while `fail_rounds` is set
    #[derive(Clone, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_rounds: Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == GAME_STATE_KEY && self.fail_rounds.get() {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source: io::Error::other("disk full"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn abandonment_is_not_counted_when_new_round_is_not_stored() {
        let mut store = FlakyStore::default();
        let state = GameState::new(crate::core::Word::new("apple").unwrap());
        save_record(&mut store, GAME_STATE_KEY, &state).unwrap();
        let fail_rounds = Rc::clone(&store.fail_rounds);

        let mut session =
            Session::load(single_word("apple"), store, StdRng::seed_from_u64(3)).unwrap();
        for ch in "close".chars() {
            session.handle(Input::Letter(ch));
        }
        session.handle(Input::Enter);

        fail_rounds.set(true);
        let step = session.handle(Input::Restart);
        assert_eq!(step.outcome, Some(RoundOutcome::Abandoned));

        // The stored round is still the old one, so it must stay uncounted
        let inner = session.store().inner.clone();
        let stored: HistoryAggregate = load_or_default(&inner, HISTORY_STATE_KEY);
        assert_eq!(stored.abandonments(), 0);

        let mut reloaded = session_with_store(inner);
        assert_eq!(reloaded.snapshot().round.attempts(), 1);
        enter(&mut reloaded, "apple");
        assert_eq!(reloaded.history().total_rounds(), 1);
        assert_eq!(reloaded.history().successes(2), 1);
    }

    #[test]
    fn abandonment_is_counted_after_new_round_is_stored() {
        let mut session = session_with(MemoryStore::new(), "apple");
        enter(&mut session, "close");
        session.handle(Input::Restart);

        let stored: HistoryAggregate = load_or_default(session.store(), HISTORY_STATE_KEY);
        assert_eq!(stored.abandonments(), 1);

        let reloaded = session_with_store(session.store().clone());
        assert_eq!(reloaded.snapshot().round.attempts(), 0);
        assert_eq!(reloaded.history().abandonments(), 1);
    }
}
