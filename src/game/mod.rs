//! Round state machine and the session that drives it
//!
//! Input flows into [`Session::handle`], which steps the [`GameState`],
//! hands any round outcome to the history and then persists both records.

mod input;
mod round;
mod session;
mod state;

pub use input::Input;
pub use round::{
    Cursor, MAX_ATTEMPTS, Round, RoundOutcome, RoundStatus, Submission, WORD_NOT_FOUND,
};
pub use session::{GAME_STATE_KEY, HISTORY_STATE_KEY, Session, SessionError, Snapshot};
pub use state::{GameState, Step};
