//! Note collection store adapter.
//!
//! # Responsibility
//! - Serialize the collection to one JSON entry in a [`KeyValueStore`].
//! - Recover from absent or malformed entries with an empty collection.
//!
//! # Invariants
//! - The persisted value is a JSON array of notes in collection order.
//! - A collection with duplicate ids is treated as malformed.

use crate::kv::{KeyValueStore, KvError};
use crate::model::note::Note;
use log::{debug, error, info, warn};
use serde_json::error::Category;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while persisting the collection.
#[derive(Debug)]
pub enum StoreError {
    Serialize(serde_json::Error),
    Kv(KvError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Kv(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Whole-collection persistence contract.
pub trait NoteStore {
    /// Reads the persisted collection; returns an empty one on any failure.
    fn load(&self) -> Vec<Note>;
    /// Overwrites the persisted collection.
    fn save(&mut self, notes: &[Note]) -> StoreResult<()>;
}

/// [`NoteStore`] writing one JSON entry into a key-value backend.
pub struct KvNoteStore<K: KeyValueStore> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> KvNoteStore<K> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(kv: K) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Borrows the backend, mostly for inspection in tests.
    pub fn kv(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValueStore> NoteStore for KvNoteStore<K> {
    fn load(&self) -> Vec<Note> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=notes_load module=store status=ok key={} source=absent count=0",
                    self.key
                );
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=notes_load module=store status=error key={} error_code=read_failed error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match decode_notes(&raw) {
            Ok(notes) => {
                info!(
                    "event=notes_load module=store status=ok key={} count={}",
                    self.key,
                    notes.len()
                );
                notes
            }
            Err(reason) => {
                warn!(
                    "event=notes_load module=store status=recovered key={} error_code=malformed_entry bytes={} reason={}",
                    self.key,
                    raw.len(),
                    reason
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let payload = serde_json::to_string(notes)?;
        if let Err(err) = self.kv.set(&self.key, &payload) {
            error!(
                "event=notes_save module=store status=error key={} count={} error={}",
                self.key,
                notes.len(),
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=notes_save module=store status=ok key={} count={} bytes={}",
            self.key,
            notes.len(),
            payload.len()
        );
        Ok(())
    }
}

/// Parses a persisted value into a collection.
///
/// Returns a short reason string when the value does not have the expected shape.
/// The reason carries only the error category and position, never stored text.
pub fn decode_notes(raw: &str) -> Result<Vec<Note>, String> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(|err| parse_failure_reason(&err))?;
    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id.as_str()) {
            return Err(format!("duplicate note id `{}`", note.id));
        }
    }
    Ok(notes)
}

fn parse_failure_reason(err: &serde_json::Error) -> String {
    let category = match err.classify() {
        Category::Io => "io",
        Category::Syntax => "syntax",
        Category::Data => "shape_mismatch",
        Category::Eof => "unexpected_eof",
    };
    format!("{category} at line {} column {}", err.line(), err.column())
}
