//! Note collection manager.
//!
//! # Responsibility
//! - Own the in-memory collection and the ephemeral view state.
//! - Apply create/update/delete/star mutations and persist after each one.
//! - Derive the filtered view for rendering.
//!
//! # Invariants
//! - Every mutation persists the whole next collection before committing it
//!   to memory; a failed write leaves memory untouched.
//! - New notes are prepended; edits and star toggles never reorder.
//! - Invalid input (unknown id, blank note) is a silent no-op, reported
//!   through the return value only.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{validate_text, Draft, Note, NoteFilter, NoteId};
use crate::repo::note_store::{NoteStore, StoreError};
use crate::search::filter::filtered_view;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Service error for manager operations.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Persisting the collection failed; in-memory state was not changed.
    Store(StoreError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "failed to persist notes: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type ServiceResult<T> = Result<T, NoteServiceError>;

/// Full state owned by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    /// Persisted collection, most recently created first.
    pub notes: Vec<Note>,
    pub search_term: String,
    pub filter: NoteFilter,
    /// Note currently loaded into the draft for editing.
    pub editing: Option<NoteId>,
    pub draft: Draft,
}

/// Header counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteStats {
    pub total: usize,
    pub starred: usize,
}

/// Result of submitting the draft form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(NoteId),
    Updated(NoteId),
    /// Blank draft, or the edited note no longer exists.
    Rejected,
}

/// Manager over one persisted note collection.
pub struct NoteManager<S: NoteStore> {
    store: S,
    clock: Arc<dyn Clock>,
    state: BoardState,
}

impl<S: NoteStore> NoteManager<S> {
    /// Loads the collection from `store` using the system clock.
    pub fn load(store: S) -> Self {
        Self::load_with_clock(store, Arc::new(SystemClock))
    }

    /// Loads the collection from `store` with a caller-provided clock.
    pub fn load_with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        let notes = store.load();
        info!(
            "event=manager_load module=service status=ok count={}",
            notes.len()
        );
        Self {
            store,
            clock,
            state: BoardState {
                notes,
                ..BoardState::default()
            },
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.state.notes.iter().find(|note| &note.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the manager, returning the store and final state.
    pub fn into_parts(self) -> (S, BoardState) {
        (self.store, self.state)
    }

    /// Creates and prepends a note.
    ///
    /// Returns `Ok(None)` without touching storage when title and content
    /// are both blank.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> ServiceResult<Option<NoteId>> {
        let title = title.into();
        let content = content.into();
        if validate_text(&title, &content).is_err() {
            debug!("event=note_create module=service status=skipped reason=blank");
            return Ok(None);
        }

        let now = self.clock.now();
        let id = self.fresh_id();
        let note = Note {
            id: id.clone(),
            title,
            content,
            starred: false,
            created_at: now,
            updated_at: now,
        };

        let mut next = Vec::with_capacity(self.state.notes.len() + 1);
        next.push(note);
        next.extend(self.state.notes.iter().cloned());
        self.commit(next)?;

        info!("event=note_create module=service status=ok note_id={id}");
        Ok(Some(id))
    }

    /// Replaces title and content of an existing note and leaves edit mode.
    ///
    /// Returns `Ok(false)` when the id is unknown or the new text is blank;
    /// edit mode is left untouched in that case.
    pub fn update(
        &mut self,
        id: &NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> ServiceResult<bool> {
        let title = title.into();
        let content = content.into();
        if validate_text(&title, &content).is_err() {
            debug!("event=note_update module=service status=skipped reason=blank note_id={id}");
            return Ok(false);
        }
        let Some(index) = self.position(id) else {
            debug!("event=note_update module=service status=skipped reason=not_found note_id={id}");
            return Ok(false);
        };

        let now = self.clock.now();
        let mut next = self.state.notes.clone();
        next[index].apply_edit(title, content, now);
        self.commit(next)?;

        self.state.editing = None;
        self.state.draft.clear();
        info!("event=note_update module=service status=ok note_id={id}");
        Ok(true)
    }

    /// Removes a note. Clears edit mode when it was the edited note.
    pub fn delete(&mut self, id: &NoteId) -> ServiceResult<bool> {
        let Some(index) = self.position(id) else {
            debug!("event=note_delete module=service status=skipped reason=not_found note_id={id}");
            return Ok(false);
        };

        let mut next = self.state.notes.clone();
        next.remove(index);
        self.commit(next)?;

        if self.state.editing.as_ref() == Some(id) {
            self.state.editing = None;
            self.state.draft.clear();
        }
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(true)
    }

    /// Flips the star flag and returns the new value.
    ///
    /// `updated_at` is not refreshed.
    pub fn toggle_star(&mut self, id: &NoteId) -> ServiceResult<Option<bool>> {
        let Some(index) = self.position(id) else {
            debug!("event=note_star module=service status=skipped reason=not_found note_id={id}");
            return Ok(None);
        };

        let mut next = self.state.notes.clone();
        next[index].toggle_star();
        let starred = next[index].starred;
        self.commit(next)?;

        info!("event=note_star module=service status=ok note_id={id} starred={starred}");
        Ok(Some(starred))
    }

    /// Loads an existing note into the draft and enters edit mode.
    ///
    /// Unknown ids leave the state unchanged and return `false`.
    pub fn begin_edit(&mut self, id: &NoteId) -> bool {
        let Some(note) = self.note(id) else {
            return false;
        };
        let draft = Draft {
            title: note.title.clone(),
            content: note.content.clone(),
        };
        self.state.draft = draft;
        self.state.editing = Some(id.clone());
        true
    }

    /// Leaves edit mode and empties the draft.
    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
        self.state.draft.clear();
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.state.draft.title = title.into();
    }

    pub fn set_draft_content(&mut self, content: impl Into<String>) {
        self.state.draft.content = content.into();
    }

    /// Submits the draft: updates the edited note, or creates a new one.
    ///
    /// The draft is reset after a successful create or update, and also when
    /// the note being edited no longer exists.
    pub fn submit(&mut self) -> ServiceResult<SubmitOutcome> {
        if self.state.draft.is_blank() {
            return Ok(SubmitOutcome::Rejected);
        }
        let Draft { title, content } = self.state.draft.clone();

        if let Some(id) = self.state.editing.clone() {
            if self.update(&id, title, content)? {
                return Ok(SubmitOutcome::Updated(id));
            }
            // Edited note is gone; drop the stale edit session.
            self.cancel_edit();
            return Ok(SubmitOutcome::Rejected);
        }

        match self.create(title, content)? {
            Some(id) => {
                self.state.draft.clear();
                Ok(SubmitOutcome::Created(id))
            }
            None => Ok(SubmitOutcome::Rejected),
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    pub fn clear_search(&mut self) {
        self.state.search_term.clear();
    }

    pub fn set_filter(&mut self, filter: NoteFilter) {
        self.state.filter = filter;
    }

    /// Filtered view of the current state, evaluated at the clock's current time.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filtered_view(
            &self.state.notes,
            &self.state.search_term,
            self.state.filter,
            self.clock.now(),
        )
    }

    pub fn stats(&self) -> NoteStats {
        NoteStats {
            total: self.state.notes.len(),
            starred: self.state.notes.iter().filter(|note| note.starred).count(),
        }
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.state.notes.iter().position(|note| &note.id == id)
    }

    fn fresh_id(&self) -> NoteId {
        loop {
            let id = NoteId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, next: Vec<Note>) -> ServiceResult<()> {
        self.store.save(&next)?;
        self.state.notes = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteManager, SubmitOutcome};
    use crate::kv::MemoryKvStore;
    use crate::model::note::NoteId;
    use crate::repo::note_store::KvNoteStore;

    #[test]
    fn submit_in_create_mode_resets_draft() {
        let mut manager = NoteManager::load(KvNoteStore::new(MemoryKvStore::new()));
        manager.set_draft_title("Plan");
        manager.set_draft_content("ship it");

        let outcome = manager.submit().unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(manager.state().draft.title.is_empty());
        assert!(manager.state().draft.content.is_empty());
        assert_eq!(manager.notes().len(), 1);
    }

    #[test]
    fn submit_blank_draft_is_rejected_without_writes() {
        let mut manager = NoteManager::load(KvNoteStore::new(MemoryKvStore::new()));
        manager.set_draft_title("   ");

        assert_eq!(manager.submit().unwrap(), SubmitOutcome::Rejected);
        assert_eq!(manager.store().kv().write_count(), 0);
        assert_eq!(manager.state().draft.title, "   ");
    }

    #[test]
    fn submit_for_missing_edit_target_leaves_edit_mode() {
        let mut manager = NoteManager::load(KvNoteStore::new(MemoryKvStore::new()));
        manager.state.editing = Some(NoteId::from("gone"));
        manager.set_draft_title("orphaned edit");

        assert_eq!(manager.submit().unwrap(), SubmitOutcome::Rejected);
        assert_eq!(manager.state().editing, None);
        assert!(manager.state().draft.is_blank());
        assert!(manager.notes().is_empty());
        assert_eq!(manager.store().kv().write_count(), 0);
    }

    #[test]
    fn blank_create_does_not_touch_collection() {
        let mut manager = NoteManager::load(KvNoteStore::new(MemoryKvStore::new()));
        manager.create("kept", "").unwrap();

        assert_eq!(manager.create(" ", "\n").unwrap(), None);
        assert_eq!(manager.notes().len(), 1);
        assert_eq!(manager.store().kv().write_count(), 1);
    }
}
