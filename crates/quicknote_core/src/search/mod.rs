//! Derived views over the note collection.
//!
//! # Responsibility
//! - Compute the search + filter subset shown to the user.
//! - Keep view derivation pure so it can run on every render.

pub mod filter;
