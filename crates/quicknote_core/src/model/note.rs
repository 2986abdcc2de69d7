//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical persisted note record.
//! - Provide lifecycle helpers for edit and star semantics.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `updated_at` never moves backwards and is untouched by star toggles.
//! - Wire fields are camelCase with RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Title shown for notes whose title is empty.
pub const UNTITLED: &str = "Untitled";

/// Opaque note identifier.
///
/// New ids are random v4 UUIDs, but any string is accepted on load so that
/// collections written by older clients keep their identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation failures for note content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title and content are both empty after trimming.
    BlankNote,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankNote => write!(f, "note title and content cannot both be blank"),
        }
    }
}

impl Error for NoteValidationError {}

/// Checks that at least one of title/content has non-whitespace text.
pub fn validate_text(title: &str, content: &str) -> Result<(), NoteValidationError> {
    if title.trim().is_empty() && content.trim().is_empty() {
        return Err(NoteValidationError::BlankNote);
    }
    Ok(())
}

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub starred: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates an unstarred note stamped with `now`.
    ///
    /// # Errors
    /// - Returns `BlankNote` when title and content are both blank.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let title = title.into();
        let content = content.into();
        validate_text(&title, &content)?;
        Ok(Self {
            id,
            title,
            content,
            starred: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces title and content and refreshes `updated_at`.
    ///
    /// `updated_at` is clamped so that a clock running backwards cannot make
    /// an edit look older than the previous one.
    pub fn apply_edit(&mut self, title: String, content: String, now: DateTime<Utc>) {
        self.title = title;
        self.content = content;
        self.updated_at = now.max(self.updated_at);
    }

    /// Flips the star flag. Timestamps are left alone.
    pub fn toggle_star(&mut self) {
        self.starred = !self.starred;
    }

    /// Title for display; falls back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            self.title.as_str()
        }
    }
}

/// View filter applied on top of the search term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoteFilter {
    #[default]
    All,
    /// Notes updated within the last 24 hours.
    Recent,
    Starred,
}

impl NoteFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Recent => "recent",
            Self::Starred => "starred",
        }
    }
}

impl Display for NoteFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterError(String);

impl Display for ParseFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|recent|starred",
            self.0
        )
    }
}

impl Error for ParseFilterError {}

impl FromStr for NoteFilter {
    type Err = ParseFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "recent" => Ok(Self::Recent),
            "starred" => Ok(Self::Starred),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// Editor form fields bound to the create/edit UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn is_blank(&self) -> bool {
        validate_text(&self.title, &self.content).is_err()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteFilter, NoteId, NoteValidationError};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn new_rejects_whitespace_only_text() {
        let now = Utc::now();
        let err = Note::new(NoteId::generate(), "   ", "\n\t", now).unwrap_err();
        assert_eq!(err, NoteValidationError::BlankNote);
    }

    #[test]
    fn apply_edit_never_moves_updated_at_backwards() {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut note = Note::new(NoteId::generate(), "t", "c", created).unwrap();

        note.apply_edit("t2".into(), "c2".into(), created - Duration::minutes(5));
        assert_eq!(note.updated_at, created);
        assert_eq!(note.title, "t2");
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("Starred".parse::<NoteFilter>().unwrap(), NoteFilter::Starred);
        assert_eq!(" recent ".parse::<NoteFilter>().unwrap(), NoteFilter::Recent);
        assert!("pinned".parse::<NoteFilter>().is_err());
    }

    #[test]
    fn display_title_falls_back_for_empty_title() {
        let note = Note::new(NoteId::generate(), "", "body", Utc::now()).unwrap();
        assert_eq!(note.display_title(), "Untitled");
    }
}
