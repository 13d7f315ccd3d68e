//! Durable key-value storage for game records
//!
//! Records are JSON documents under stable string keys. Reading never fails
//! the caller: a missing or unreadable record falls back to a default.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors raised by a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access record '{key}'")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode record '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed durable storage, last writer wins
pub trait KeyValueStore {
    /// Read the raw value under `key`, `None` if absent
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`; absent keys are not an error
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load and decode a record
///
/// Returns `None` when the record is missing, unreadable or does not decode;
/// the last two are logged.
#[instrument(skip(store))]
pub fn load_record<T: DeserializeOwned, S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored record");
            return None;
        }
        Err(err) => {
            warn!(%err, "Could not read record, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%err, "Corrupt record, using default");
            None
        }
    }
}

/// Load a record, falling back to `T::default()`
pub fn load_or_default<T: DeserializeOwned + Default, S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> T {
    load_record(store, key).unwrap_or_default()
}

/// Encode and write a record
///
/// # Errors
/// Returns `StoreError` if encoding or writing fails.
#[instrument(skip(store, value))]
pub fn save_record<T: Serialize, S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)?;
    debug!(bytes = raw.len(), "Record saved");
    Ok(())
}
