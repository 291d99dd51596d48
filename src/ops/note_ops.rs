use indexmap::IndexMap;

use crate::model::note::{ChecklistItem, Note, NoteKind};

/// Error type for note operations
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(String),
    #[error("ambiguous id prefix: {0} matches more than one note")]
    Ambiguous(String),
    #[error("note {id} is not a {expected} note")]
    WrongKind { id: String, expected: &'static str },
    #[error("no checklist item at index {index} in note {id}")]
    NoSuchItem { id: String, index: usize },
}

/// Resolve a full id or unique id prefix to the note's full id.
///
/// Exact matches win; otherwise a prefix must match exactly one note.
pub fn resolve_id(notes: &IndexMap<String, Note>, prefix: &str) -> Result<String, NoteError> {
    if notes.contains_key(prefix) {
        return Ok(prefix.to_string());
    }
    let mut matches = notes.keys().filter(|id| id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.clone()),
        (Some(_), Some(_)) => Err(NoteError::Ambiguous(prefix.to_string())),
        (None, _) => Err(NoteError::NotFound(prefix.to_string())),
    }
}

fn get_mut<'a>(
    notes: &'a mut IndexMap<String, Note>,
    id_or_prefix: &str,
) -> Result<&'a mut Note, NoteError> {
    let id = resolve_id(notes, id_or_prefix)?;
    Ok(notes.get_mut(&id).expect("resolved id exists"))
}

// ---------------------------------------------------------------------------
// Note CRUD
// ---------------------------------------------------------------------------

/// Create a new note and insert it into the collection.
/// Returns the assigned id.
pub fn create_note(
    notes: &mut IndexMap<String, Note>,
    kind: NoteKind,
    title: String,
    content: String,
    color: Option<String>,
    favorite: bool,
) -> String {
    let mut note = Note::new(kind, title, content);
    note.color = color;
    note.favorite = favorite;
    if kind == NoteKind::Task {
        note.schedule = Some(Default::default());
    }
    let id = note.id.clone();
    notes.insert(id.clone(), note);
    id
}

/// Set a note's title and/or content.
pub fn edit_note(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<(), NoteError> {
    let note = get_mut(notes, id)?;
    if let Some(title) = title {
        note.title = title;
    }
    if let Some(content) = content {
        note.content = content;
    }
    note.touch();
    Ok(())
}

/// Set or clear a note's color tag.
pub fn set_color(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    color: Option<String>,
) -> Result<(), NoteError> {
    let note = get_mut(notes, id)?;
    note.color = color;
    note.touch();
    Ok(())
}

/// Toggle the favorite flag. Returns the new value.
pub fn toggle_favorite(notes: &mut IndexMap<String, Note>, id: &str) -> Result<bool, NoteError> {
    let note = get_mut(notes, id)?;
    note.favorite = !note.favorite;
    note.touch();
    Ok(note.favorite)
}

/// Toggle the hidden flag. Returns the new value.
pub fn toggle_hidden(notes: &mut IndexMap<String, Note>, id: &str) -> Result<bool, NoteError> {
    let note = get_mut(notes, id)?;
    note.hidden = !note.hidden;
    note.touch();
    Ok(note.hidden)
}

// ---------------------------------------------------------------------------
// Checklist items
// ---------------------------------------------------------------------------

fn checklist_mut<'a>(
    notes: &'a mut IndexMap<String, Note>,
    id: &str,
) -> Result<&'a mut Note, NoteError> {
    let note = get_mut(notes, id)?;
    if note.kind != NoteKind::Checklist {
        return Err(NoteError::WrongKind {
            id: note.id.clone(),
            expected: "checklist",
        });
    }
    Ok(note)
}

/// Append a checklist item. Returns its index.
pub fn add_item(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    text: String,
) -> Result<usize, NoteError> {
    let note = checklist_mut(notes, id)?;
    note.items.push(ChecklistItem::new(text));
    note.touch();
    Ok(note.items.len() - 1)
}

/// Toggle a checklist item's done flag by index. Returns the new value.
pub fn toggle_item(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    index: usize,
) -> Result<bool, NoteError> {
    let note = checklist_mut(notes, id)?;
    let note_id = note.id.clone();
    let item = note
        .items
        .get_mut(index)
        .ok_or(NoteError::NoSuchItem { id: note_id, index })?;
    item.done = !item.done;
    let done = item.done;
    note.touch();
    Ok(done)
}

/// Remove a checklist item by index. Returns its text.
pub fn remove_item(
    notes: &mut IndexMap<String, Note>,
    id: &str,
    index: usize,
) -> Result<String, NoteError> {
    let note = checklist_mut(notes, id)?;
    if index >= note.items.len() {
        return Err(NoteError::NoSuchItem {
            id: note.id.clone(),
            index,
        });
    }
    let item = note.items.remove(index);
    note.touch();
    Ok(item.text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notes() -> IndexMap<String, Note> {
        let mut notes = IndexMap::new();
        create_note(
            &mut notes,
            NoteKind::Text,
            "Plain note".into(),
            "body".into(),
            None,
            false,
        );
        create_note(
            &mut notes,
            NoteKind::Checklist,
            "Groceries".into(),
            String::new(),
            Some("green".into()),
            false,
        );
        notes
    }

    fn id_of<'a>(notes: &'a IndexMap<String, Note>, title: &str) -> &'a str {
        notes
            .values()
            .find(|n| n.title == title)
            .map(|n| n.id.as_str())
            .unwrap()
    }

    #[test]
    fn create_assigns_unique_ids_and_defaults() {
        let notes = sample_notes();
        assert_eq!(notes.len(), 2);
        let checklist = notes.values().find(|n| n.kind == NoteKind::Checklist).unwrap();
        assert_eq!(checklist.color.as_deref(), Some("green"));
        assert!(!checklist.synced);
    }

    #[test]
    fn create_task_note_gets_a_schedule() {
        let mut notes = IndexMap::new();
        let id = create_note(
            &mut notes,
            NoteKind::Task,
            "Dentist".into(),
            String::new(),
            None,
            false,
        );
        assert!(notes[&id].schedule.is_some());
    }

    #[test]
    fn resolve_exact_and_prefix() {
        let notes = sample_notes();
        let full = id_of(&notes, "Plain note").to_string();
        assert_eq!(resolve_id(&notes, &full).unwrap(), full);
        // Two random UUIDs can share a short prefix; grow it until unique
        let mut len = 4;
        loop {
            let prefix = &full[..len];
            match resolve_id(&notes, prefix) {
                Ok(id) => {
                    assert_eq!(id, full);
                    break;
                }
                Err(NoteError::Ambiguous(_)) => len += 4,
                Err(e) => panic!("unexpected: {e}"),
            }
        }
    }

    #[test]
    fn resolve_unknown_is_not_found() {
        let notes = sample_notes();
        assert!(matches!(
            resolve_id(&notes, "zzzz"),
            Err(NoteError::NotFound(_))
        ));
    }

    #[test]
    fn edit_updates_fields_and_touches() {
        let mut notes = sample_notes();
        let id = id_of(&notes, "Plain note").to_string();
        notes.get_mut(&id).unwrap().synced = true;

        edit_note(&mut notes, &id, Some("Renamed".into()), None).unwrap();
        let note = &notes[&id];
        assert_eq!(note.title, "Renamed");
        assert_eq!(note.content, "body");
        assert!(!note.synced);
    }

    #[test]
    fn toggle_flags() {
        let mut notes = sample_notes();
        let id = id_of(&notes, "Plain note").to_string();
        assert!(toggle_favorite(&mut notes, &id).unwrap());
        assert!(!toggle_favorite(&mut notes, &id).unwrap());
        assert!(toggle_hidden(&mut notes, &id).unwrap());
    }

    #[test]
    fn checklist_item_lifecycle() {
        let mut notes = sample_notes();
        let id = id_of(&notes, "Groceries").to_string();

        let idx = add_item(&mut notes, &id, "milk".into()).unwrap();
        add_item(&mut notes, &id, "bread".into()).unwrap();
        assert_eq!(idx, 0);

        assert!(toggle_item(&mut notes, &id, 0).unwrap());
        assert!(!toggle_item(&mut notes, &id, 0).unwrap());

        let text = remove_item(&mut notes, &id, 1).unwrap();
        assert_eq!(text, "bread");
        assert_eq!(notes[&id].items.len(), 1);
    }

    #[test]
    fn checklist_ops_reject_wrong_kind_and_bad_index() {
        let mut notes = sample_notes();
        let text_id = id_of(&notes, "Plain note").to_string();
        let list_id = id_of(&notes, "Groceries").to_string();

        assert!(matches!(
            add_item(&mut notes, &text_id, "x".into()),
            Err(NoteError::WrongKind { .. })
        ));
        assert!(matches!(
            toggle_item(&mut notes, &list_id, 5),
            Err(NoteError::NoSuchItem { index: 5, .. })
        ));
    }
}
