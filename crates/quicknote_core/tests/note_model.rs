use chrono::{TimeZone, Utc};
use quicknote_core::{Note, NoteFilter, NoteId, NoteValidationError};

#[test]
fn note_new_sets_defaults() {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
    let note = Note::new(NoteId::generate(), "Title", "", now).unwrap();

    assert!(!note.id.as_str().is_empty());
    assert!(!note.starred);
    assert_eq!(note.created_at, now);
    assert_eq!(note.updated_at, now);
}

#[test]
fn generated_ids_are_distinct() {
    let first = NoteId::generate();
    let second = NoteId::generate();
    assert_ne!(first, second);
}

#[test]
fn blank_title_and_content_are_rejected() {
    let err = Note::new(NoteId::generate(), "", "  ", Utc::now()).unwrap_err();
    assert_eq!(err, NoteValidationError::BlankNote);
}

#[test]
fn note_serialization_uses_expected_wire_fields() {
    let now = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let mut note = Note::new(NoteId::from("note-1"), "Groceries", "milk", now).unwrap();
    note.starred = true;

    let json = serde_json::to_value(&note).unwrap();
    assert_eq!(json["id"], "note-1");
    assert_eq!(json["title"], "Groceries");
    assert_eq!(json["content"], "milk");
    assert_eq!(json["starred"], true);
    assert_eq!(json["createdAt"], "2026-02-13T10:00:00Z");
    assert_eq!(json["updatedAt"], "2026-02-13T10:00:00Z");

    let decoded: Note = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, note);
}

#[test]
fn toggle_star_leaves_timestamps_alone() {
    let now = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let mut note = Note::new(NoteId::generate(), "a", "b", now).unwrap();

    note.toggle_star();
    assert!(note.starred);
    note.toggle_star();
    assert!(!note.starred);
    assert_eq!(note.updated_at, now);
}

#[test]
fn filter_names_are_lowercase() {
    assert_eq!(NoteFilter::Recent.as_str(), "recent");
    assert_eq!(NoteFilter::Starred.to_string(), "starred");
    assert_eq!(NoteFilter::default(), NoteFilter::All);
}
