use chrono::{TimeZone, Utc};
use quicknote_core::db::open_db_in_memory;
use quicknote_core::{
    KeyValueStore, KvNoteStore, MemoryKvStore, Note, NoteId, NoteStore, SqliteKvStore, StoreError,
};

fn sample_notes() -> Vec<Note> {
    let now = Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap();
    vec![
        Note::new(NoteId::from("b"), "second", "", now).unwrap(),
        Note::new(NoteId::from("a"), "", "first body", now).unwrap(),
    ]
}

#[test]
fn load_returns_empty_when_entry_is_absent() {
    let store = KvNoteStore::new(MemoryKvStore::new());
    assert!(store.load().is_empty());
}

#[test]
fn load_recovers_from_malformed_entries() {
    for raw in [
        "",
        "{",
        "null",
        r#"{"id":"x"}"#,
        r#"[{"id":"x","title":"t"}]"#,
        r#"[{"id":"x","title":"t","content":"","starred":false,"createdAt":"yesterday","updatedAt":"now"}]"#,
    ] {
        let store = KvNoteStore::new(MemoryKvStore::new().with_entry("notes", raw));
        assert!(store.load().is_empty(), "expected empty collection for {raw:?}");
    }
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let mut store = KvNoteStore::new(MemoryKvStore::new());
    let notes = sample_notes();

    store.save(&notes).unwrap();

    assert_eq!(store.load(), notes);
}

#[test]
fn save_propagates_backend_write_failures() {
    let mut kv = MemoryKvStore::new();
    kv.set_fail_writes(true);
    let mut store = KvNoteStore::new(kv);

    let err = store.save(&sample_notes()).unwrap_err();
    assert!(matches!(err, StoreError::Kv(_)));
    assert!(store.kv().raw("notes").is_none());
}

#[test]
fn custom_key_isolates_collections() {
    let mut kv = MemoryKvStore::new();
    {
        let mut work = KvNoteStore::with_key(&mut kv, "work");
        work.save(&sample_notes()).unwrap();
    }

    let personal = KvNoteStore::with_key(&mut kv, "personal");
    assert!(personal.load().is_empty());
    assert!(kv.raw("work").is_some());
}

#[test]
fn sqlite_backed_store_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let mut store = KvNoteStore::new(SqliteKvStore::new(&conn));
    let notes = sample_notes();

    store.save(&notes).unwrap();
    store.save(&notes[..1]).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id.as_str(), "b");

    let raw = SqliteKvStore::new(&conn).get("notes").unwrap().unwrap();
    assert!(raw.starts_with('['));
}
