//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection mutations, persistence and view derivation.
//! - Keep the rendering layer decoupled from storage details.

pub mod note_manager;
