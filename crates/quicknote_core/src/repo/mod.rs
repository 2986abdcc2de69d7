//! Store adapter between the note collection and key-value persistence.
//!
//! # Responsibility
//! - Load the whole collection once at startup.
//! - Rewrite the whole collection after every mutation.
//!
//! # Invariants
//! - Loading never fails for the caller; unusable data degrades to an empty collection.
//! - Saving never writes partial collections.

pub mod note_store;
