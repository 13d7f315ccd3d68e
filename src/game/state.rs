//! Round plus keyboard coloring, stepped one input at a time

use super::input::Input;
use super::round::{Round, RoundOutcome, Submission};
use crate::core::{CharStatusMap, Word};
use crate::dictionary::Dictionary;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a single input did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Step {
    /// State differs from before the input
    pub changed: bool,
    /// A round resolved (or was abandoned) during this input
    pub outcome: Option<RoundOutcome>,
}

impl Step {
    const UNCHANGED: Self = Self {
        changed: false,
        outcome: None,
    };

    const fn changed(changed: bool) -> Self {
        Self {
            changed,
            outcome: None,
        }
    }
}

/// Everything owned by the active game: the round and its keyboard map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub(crate) round: Round,
    #[serde(default)]
    pub(crate) chars_status: CharStatusMap,
}

impl GameState {
    #[must_use]
    pub fn new(word: Word) -> Self {
        Self {
            round: Round::new(word),
            chars_status: CharStatusMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn round(&self) -> &Round {
        &self.round
    }

    #[inline]
    #[must_use]
    pub const fn chars_status(&self) -> &CharStatusMap {
        &self.chars_status
    }

    /// Repair state read from storage
    ///
    /// Clamps the cursor and rebuilds the keyboard map from the grid.
    pub(crate) fn sanitize(&mut self) {
        self.round.sanitize();
        self.chars_status = CharStatusMap::from_guesses(self.round.guesses());
    }

    /// Apply one input
    ///
    /// `Enter` on a finished round and `Restart` draw a new word from the
    /// dictionary. Restarting a round that is still playing reports it as
    /// abandoned.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        input: Input,
        dictionary: &Dictionary,
        rng: &mut R,
    ) -> Step {
        let done = self.round.status().is_done();

        match input {
            Input::Letter(ch) => Step::changed(self.round.type_letter(ch)),
            Input::Backspace => Step::changed(self.round.backspace()),
            Input::ArrowLeft => Step::changed(self.round.move_left()),
            Input::ArrowRight => Step::changed(self.round.move_right()),
            Input::CellClick(index) => Step::changed(self.round.click_cell(index)),
            Input::Enter if done => self.restart(dictionary, rng),
            Input::Enter => match self.round.submit(dictionary, &mut self.chars_status) {
                Submission::Ignored => Step::UNCHANGED,
                Submission::NotFound => Step::changed(true),
                Submission::Evaluated { outcome, .. } => Step {
                    changed: true,
                    outcome,
                },
            },
            Input::Restart => self.restart(dictionary, rng),
        }
    }

    fn restart<R: Rng + ?Sized>(&mut self, dictionary: &Dictionary, rng: &mut R) -> Step {
        let Some(word) = dictionary.random_word(rng) else {
            return Step::UNCHANGED;
        };

        let outcome = (!self.round.status().is_done()).then_some(RoundOutcome::Abandoned);
        *self = Self::new(word.clone());

        Step {
            changed: true,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Status;
    use crate::game::round::{MAX_ATTEMPTS, RoundStatus, WORD_NOT_FOUND};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dictionary() -> Dictionary {
        Dictionary::from_strs(&["apple", "close", "pleat", "crane"])
    }

    fn state(word: &str) -> GameState {
        GameState::new(Word::new(word).unwrap())
    }

    fn enter_word(state: &mut GameState, word: &str, rng: &mut StdRng) -> Step {
        let dictionary = dictionary();
        for ch in word.chars() {
            state.step(Input::Letter(ch), &dictionary, rng);
        }
        state.step(Input::Enter, &dictionary, rng)
    }

    #[test]
    fn ignored_inputs_report_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        let dictionary = dictionary();

        assert_eq!(
            state.step(Input::Backspace, &dictionary, &mut rng),
            Step::UNCHANGED
        );
        assert_eq!(
            state.step(Input::Letter('!'), &dictionary, &mut rng),
            Step::UNCHANGED
        );
        assert_eq!(
            state.step(Input::Enter, &dictionary, &mut rng),
            Step::UNCHANGED
        );
        assert_eq!(state, self::state("apple"));
    }

    #[test]
    fn unknown_word_changes_only_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        let step = enter_word(&mut state, "xxxxx", &mut rng);

        assert!(step.changed);
        assert_eq!(step.outcome, None);
        assert_eq!(state.round().last_error(), Some(WORD_NOT_FOUND));
        assert_eq!(state.round().cursor().cell_index, 5);
        assert!(state.chars_status().is_empty());
    }

    #[test]
    fn win_reports_attempts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        enter_word(&mut state, "close", &mut rng);
        enter_word(&mut state, "pleat", &mut rng);
        let step = enter_word(&mut state, "apple", &mut rng);

        assert_eq!(step.outcome, Some(RoundOutcome::Won { attempts: 3 }));
        assert_eq!(state.round().status(), RoundStatus::Won);
        assert_eq!(state.chars_status().get('a'), Some(Status::Correct));
    }

    #[test]
    fn enter_after_done_starts_new_round_without_outcome() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        enter_word(&mut state, "apple", &mut rng);

        let step = state.step(Input::Enter, &dictionary(), &mut rng);
        assert!(step.changed);
        assert_eq!(step.outcome, None);
        assert_eq!(state.round().status(), RoundStatus::Playing);
        assert_eq!(state.round().attempts(), 0);
        assert!(state.chars_status().is_empty());
    }

    #[test]
    fn restart_while_playing_is_abandonment() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        enter_word(&mut state, "close", &mut rng);

        let step = state.step(Input::Restart, &dictionary(), &mut rng);
        assert_eq!(step.outcome, Some(RoundOutcome::Abandoned));
        assert_eq!(state.round().attempts(), 0);
        assert!(state.chars_status().is_empty());
        assert!(dictionary().words().contains(state.round().word()));
    }

    #[test]
    fn restart_after_loss_is_not_abandonment() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        for _ in 0..MAX_ATTEMPTS {
            enter_word(&mut state, "crane", &mut rng);
        }
        assert_eq!(state.round().status(), RoundStatus::Lost);

        let step = state.step(Input::Restart, &dictionary(), &mut rng);
        assert_eq!(step.outcome, None);
        assert_eq!(state.round().status(), RoundStatus::Playing);
    }

    #[test]
    fn restart_with_empty_dictionary_keeps_round() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        let empty = Dictionary::new(Vec::new());

        assert_eq!(
            state.step(Input::Restart, &empty, &mut rng),
            Step::UNCHANGED
        );
        assert_eq!(state.round().word().text(), "apple");
    }

    #[test]
    fn sanitize_rebuilds_keyboard_from_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state("apple");
        enter_word(&mut state, "close", &mut rng);
        let expected = state.chars_status().clone();

        state.chars_status = CharStatusMap::new();
        state.sanitize();
        assert_eq!(state.chars_status(), &expected);
    }
}
