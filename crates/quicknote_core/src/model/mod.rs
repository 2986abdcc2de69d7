//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the persisted `Note` record and its wire shape.
//! - Define the ephemeral view types (`NoteFilter`, `Draft`).
//!
//! # Invariants
//! - Every note is identified by an opaque `NoteId`, unique within a collection.
//! - A note whose title and content are both blank is never created.

pub mod note;
