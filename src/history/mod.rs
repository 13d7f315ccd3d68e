//! Cross-round statistics
//!
//! The aggregate is updated once per resolved round and persisted by the
//! session after every change.

use crate::game::{MAX_ATTEMPTS, RoundOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable win/loss record
///
/// Missing fields deserialize to their defaults, so older or partial records
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryAggregate {
    success_by_attempts: BTreeMap<usize, u32>,
    failures: u32,
    abandonments: u32,
    streak: u32,
    best_streak: u32,
}

impl HistoryAggregate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one resolved round
    ///
    /// # Examples
    /// ```
    /// use wordle_play::game::RoundOutcome;
    /// use wordle_play::history::HistoryAggregate;
    ///
    /// let mut history = HistoryAggregate::new();
    /// history.record(RoundOutcome::Won { attempts: 3 });
    /// history.record(RoundOutcome::Lost);
    /// history.record(RoundOutcome::Abandoned);
    ///
    /// assert_eq!(history.total_rounds(), 3);
    /// assert_eq!(history.streak(), 0);
    /// assert_eq!(history.best_streak(), 1);
    /// ```
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Won { attempts } => {
                *self.success_by_attempts.entry(attempts).or_insert(0) += 1;
                self.streak += 1;
                self.best_streak = self.best_streak.max(self.streak);
            }
            RoundOutcome::Lost => {
                self.failures += 1;
                self.streak = 0;
            }
            RoundOutcome::Abandoned => {
                self.abandonments += 1;
                self.streak = 0;
            }
        }
    }

    /// Wins that took exactly `attempts` rows
    #[must_use]
    pub fn successes(&self, attempts: usize) -> u32 {
        self.success_by_attempts
            .get(&attempts)
            .copied()
            .unwrap_or(0)
    }

    /// Win counts for 1 through [`MAX_ATTEMPTS`] rows, in order
    #[must_use]
    pub fn distribution(&self) -> [u32; MAX_ATTEMPTS] {
        std::array::from_fn(|i| self.successes(i + 1))
    }

    #[must_use]
    pub fn wins(&self) -> u32 {
        self.success_by_attempts.values().sum()
    }

    #[inline]
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.failures
    }

    #[inline]
    #[must_use]
    pub const fn abandonments(&self) -> u32 {
        self.abandonments
    }

    #[inline]
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    #[inline]
    #[must_use]
    pub const fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Rounds lost or abandoned
    #[must_use]
    pub const fn defeats(&self) -> u32 {
        self.failures + self.abandonments
    }

    /// All rounds ever resolved; always derived, never stored
    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.defeats() + self.wins()
    }

    /// Rounded share of wins, 0 when nothing has been played
    #[must_use]
    pub fn win_percentage(&self) -> u32 {
        let total = self.total_rounds();
        if total == 0 {
            return 0;
        }
        (f64::from(self.wins()) * 100.0 / f64::from(total)).round() as u32
    }

    /// Largest bar in the distribution chart, counting defeats as one bar
    #[must_use]
    pub fn max_bar(&self) -> u32 {
        self.success_by_attempts
            .values()
            .copied()
            .chain(std::iter::once(self.defeats()))
            .max()
            .unwrap_or(0)
    }
}
