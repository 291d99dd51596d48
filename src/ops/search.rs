use std::ops::Range;

use indexmap::IndexMap;
use regex::Regex;

use crate::model::note::Note;

/// Which field of a note matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Content,
    /// Checklist item text
    Item,
    /// Task location
    Location,
}

impl MatchField {
    pub fn label(&self) -> &'static str {
        match self {
            MatchField::Title => "title",
            MatchField::Content => "content",
            MatchField::Item => "item",
            MatchField::Location => "location",
        }
    }
}

/// A search hit in one field of one note
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub note_id: String,
    pub field: MatchField,
    /// Index of the matching checklist item, for `MatchField::Item`
    pub item_index: Option<usize>,
    /// The text that was searched, for highlight rendering
    pub text: String,
    /// Non-overlapping match byte-ranges within `text`
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search notes across title, content, checklist items, and location.
///
/// Active notes are searched by default; `in_trash` searches deleted
/// notes instead. Hidden notes are only searched when `include_hidden`.
pub fn search_notes(
    notes: &IndexMap<String, Note>,
    re: &Regex,
    in_trash: bool,
    include_hidden: bool,
) -> Vec<SearchHit> {
    let mut hits = Vec::new();

    for note in notes.values() {
        if note.deleted != in_trash {
            continue;
        }
        if note.hidden && !include_hidden {
            continue;
        }
        search_note(re, note, &mut hits);
    }

    hits
}

/// Search a single note's fields.
fn search_note(re: &Regex, note: &Note, hits: &mut Vec<SearchHit>) {
    let spans = find_matches(re, &note.title);
    if !spans.is_empty() {
        hits.push(SearchHit {
            note_id: note.id.clone(),
            field: MatchField::Title,
            item_index: None,
            text: note.title.clone(),
            spans,
        });
    }

    let spans = find_matches(re, &note.content);
    if !spans.is_empty() {
        hits.push(SearchHit {
            note_id: note.id.clone(),
            field: MatchField::Content,
            item_index: None,
            text: note.content.clone(),
            spans,
        });
    }

    for (index, item) in note.items.iter().enumerate() {
        let spans = find_matches(re, &item.text);
        if !spans.is_empty() {
            hits.push(SearchHit {
                note_id: note.id.clone(),
                field: MatchField::Item,
                item_index: Some(index),
                text: item.text.clone(),
                spans,
            });
        }
    }

    if let Some(schedule) = &note.schedule
        && let Some(location) = &schedule.location
    {
        let spans = find_matches(re, location);
        if !spans.is_empty() {
            hits.push(SearchHit {
                note_id: note.id.clone(),
                field: MatchField::Location,
                item_index: None,
                text: location.clone(),
                spans,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::note::{ChecklistItem, NoteKind};
    use crate::model::task::Schedule;

    fn sample_notes() -> IndexMap<String, Note> {
        let mut notes = IndexMap::new();

        let mut a = Note::new(NoteKind::Text, "Meeting notes".into(), "agenda: budget".into());
        a.id = "note-a".into();
        notes.insert(a.id.clone(), a);

        let mut b = Note::new(NoteKind::Checklist, "Packing".into(), String::new());
        b.id = "note-b".into();
        b.items.push(ChecklistItem::new("passport".into()));
        b.items.push(ChecklistItem::new("meeting badge".into()));
        notes.insert(b.id.clone(), b);

        let mut c = Note::new(NoteKind::Task, "Dentist".into(), String::new());
        c.id = "note-c".into();
        c.schedule = Some(Schedule {
            location: Some("Main St clinic".into()),
            ..Default::default()
        });
        notes.insert(c.id.clone(), c);

        notes
    }

    #[test]
    fn matches_title_content_items_location() {
        let notes = sample_notes();

        let re = Regex::new("meeting").unwrap();
        let hits = search_notes(&notes, &re, false, false);
        // title of note-a, item of note-b
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].note_id, "note-a");
        assert_eq!(hits[0].field, MatchField::Title);
        assert_eq!(hits[1].note_id, "note-b");
        assert_eq!(hits[1].field, MatchField::Item);
        assert_eq!(hits[1].item_index, Some(1));

        let re = Regex::new("clinic").unwrap();
        let hits = search_notes(&notes, &re, false, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, MatchField::Location);
    }

    #[test]
    fn spans_cover_the_match() {
        let notes = sample_notes();
        let re = Regex::new("budget").unwrap();
        let hits = search_notes(&notes, &re, false, false);
        assert_eq!(hits.len(), 1);
        let hit = &hits[0];
        let span = hit.spans[0].clone();
        assert_eq!(&hit.text[span], "budget");
    }

    #[test]
    fn multiple_matches_in_one_field() {
        let mut notes = IndexMap::new();
        let mut n = Note::new(NoteKind::Text, "x".into(), "cat catalog cat".into());
        n.id = "n".into();
        notes.insert(n.id.clone(), n);

        let re = Regex::new("cat").unwrap();
        let hits = search_notes(&notes, &re, false, false);
        assert_eq!(hits[0].spans.len(), 3);
    }

    #[test]
    fn trash_and_hidden_scoping() {
        let mut notes = sample_notes();
        notes.get_mut("note-a").unwrap().deleted = true;
        notes.get_mut("note-b").unwrap().hidden = true;

        let re = Regex::new("meeting").unwrap();
        // Active, no hidden: nothing matches
        assert!(search_notes(&notes, &re, false, false).is_empty());
        // Active including hidden: the checklist item
        let hits = search_notes(&notes, &re, false, true);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].note_id, "note-b");
        // Trash: the deleted note's title
        let hits = search_notes(&notes, &re, true, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].note_id, "note-a");
    }
}
