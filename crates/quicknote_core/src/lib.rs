//! Core domain logic for QuickNote.
//! This crate is the single source of truth for note collection invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Draft, Note, NoteFilter, NoteId, NoteValidationError, ParseFilterError};
pub use repo::note_store::{KvNoteStore, NoteStore, StoreError, StoreResult};
pub use search::filter::{filtered_view, is_recent, matches_search};
pub use service::note_manager::{
    BoardState, NoteManager, NoteServiceError, NoteStats, SubmitOutcome,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
