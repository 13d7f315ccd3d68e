//! Statistics commands

use crate::game::HISTORY_STATE_KEY;
use crate::history::HistoryAggregate;
use crate::output::print_history;
use crate::store::{KeyValueStore, StoreError, load_or_default};
use tracing::info;

/// Print the stored history
pub fn show_stats<S: KeyValueStore>(store: &S) {
    let history: HistoryAggregate = load_or_default(store, HISTORY_STATE_KEY);
    print_history(&history);
}

/// Delete the stored history
///
/// # Errors
///
/// Returns `StoreError` if the record cannot be removed.
pub fn reset_stats<S: KeyValueStore>(store: &mut S) -> Result<(), StoreError> {
    store.remove(HISTORY_STATE_KEY)?;
    info!("History cleared");
    Ok(())
}
