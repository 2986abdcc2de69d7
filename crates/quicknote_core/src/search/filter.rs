//! Search and filter predicates.
//!
//! # Invariants
//! - `filtered_view` has no side effects and preserves collection order.
//! - Search is a case-insensitive substring match on title or content.
//! - The recent window is evaluated against the caller-supplied `now`.

use crate::model::note::{Note, NoteFilter};
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Width of the "recent" window.
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Returns the notes matching `search_term` and `filter`, in collection order.
pub fn filtered_view<'a>(
    notes: &'a [Note],
    search_term: &str,
    filter: NoteFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Note> {
    let needle = search_term.to_lowercase();
    notes
        .iter()
        .filter(|note| matches_lowered(note, &needle))
        .filter(|note| match filter {
            NoteFilter::All => true,
            NoteFilter::Starred => note.starred,
            NoteFilter::Recent => is_recent(note, now),
        })
        .collect()
}

/// Case-insensitive substring match against title or content.
///
/// An empty term matches every note.
pub fn matches_search(note: &Note, search_term: &str) -> bool {
    matches_lowered(note, &search_term.to_lowercase())
}

fn matches_lowered(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}

/// Whether `note` was updated strictly within the last 24 hours of `now`.
///
/// Notes stamped in the future (clock skew) count as recent.
pub fn is_recent(note: &Note, now: DateTime<Utc>) -> bool {
    note.updated_at > now - Duration::hours(RECENT_WINDOW_HOURS)
}

/// One-line content preview with whitespace collapsed, capped at `max_chars`.
pub fn preview(content: &str, max_chars: usize) -> String {
    let normalized = WHITESPACE_RE.replace_all(content.trim(), " ");
    let mut text: String = normalized.chars().take(max_chars).collect();
    if normalized.chars().count() > max_chars {
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{filtered_view, is_recent, matches_search, preview};
    use crate::model::note::{Note, NoteFilter, NoteId};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn note(id: &str, title: &str, content: &str, age: Duration, starred: bool) -> Note {
        let mut note = Note::new(NoteId::from(id), title, content, now() - age).unwrap();
        note.starred = starred;
        note
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let by_title = note("1", "FOOd plan", "", Duration::zero(), false);
        let by_content = note("2", "x", "more Foo here", Duration::zero(), false);
        let neither = note("3", "bar", "baz", Duration::zero(), false);

        assert!(matches_search(&by_title, "foo"));
        assert!(matches_search(&by_content, "fOO"));
        assert!(!matches_search(&neither, "foo"));
        assert!(matches_search(&neither, ""));
    }

    #[test]
    fn recent_window_boundaries() {
        let fresh = note("1", "a", "", Duration::hours(1), false);
        let stale = note("2", "b", "", Duration::hours(25), false);
        let edge = note("3", "c", "", Duration::hours(24), false);

        assert!(is_recent(&fresh, now()));
        assert!(!is_recent(&stale, now()));
        assert!(!is_recent(&edge, now()));
    }

    #[test]
    fn starred_filter_combines_with_search_and_keeps_order() {
        let notes = vec![
            note("1", "foo one", "", Duration::zero(), true),
            note("2", "foo two", "", Duration::zero(), false),
            note("3", "bar", "", Duration::zero(), true),
            note("4", "FOO four", "", Duration::zero(), true),
        ];

        let ids: Vec<&str> = filtered_view(&notes, "foo", NoteFilter::Starred, now())
            .into_iter()
            .map(|note| note.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(preview("  a\n\n b\tc ", 10), "a b c");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
