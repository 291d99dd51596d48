use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::note::Note;

/// Current backup format version
pub const BACKUP_VERSION: &str = "1";

/// Error type for backup operations
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("could not parse backup file: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("backup contains no notes")]
    Empty,
}

/// The backup interchange format.
///
/// `categories` appears in files written by other exporters; it is accepted
/// so such files import cleanly, and otherwise ignored.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<serde_json::Value>,
    pub version: String,
    pub backup_date: DateTime<Utc>,
}

/// Result of an import operation
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Ids that did not exist locally and were inserted
    pub added: Vec<String>,
    /// Ids that existed locally and were overwritten
    pub replaced: Vec<String>,
}

impl ImportResult {
    pub fn total(&self) -> usize {
        self.added.len() + self.replaced.len()
    }
}

/// Build a backup of the full collection (trash included) stamped now.
pub fn make_backup(notes: &IndexMap<String, Note>) -> Backup {
    Backup {
        notes: notes.values().cloned().collect(),
        categories: None,
        version: BACKUP_VERSION.to_string(),
        backup_date: Utc::now(),
    }
}

/// Parse backup JSON text.
pub fn parse_backup(text: &str) -> Result<Backup, BackupError> {
    let backup: Backup = serde_json::from_str(text)?;
    if backup.notes.is_empty() {
        return Err(BackupError::Empty);
    }
    Ok(backup)
}

/// Merge a backup into the collection by id.
///
/// Unknown ids are inserted; a known id is overwritten by the incoming
/// note, whole-note, with no field-level merge. Every imported note is
/// marked unsynced so the next sync pushes it.
pub fn merge_backup(notes: &mut IndexMap<String, Note>, backup: Backup) -> ImportResult {
    let mut result = ImportResult::default();

    for mut note in backup.notes {
        note.synced = false;
        let id = note.id.clone();
        if notes.insert(id.clone(), note).is_some() {
            result.replaced.push(id);
        } else {
            result.added.push(id);
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::note::NoteKind;
    use pretty_assertions::assert_eq;

    fn collection(titles: &[&str]) -> IndexMap<String, Note> {
        titles
            .iter()
            .map(|t| {
                let n = Note::new(NoteKind::Text, (*t).into(), String::new());
                (n.id.clone(), n)
            })
            .collect()
    }

    #[test]
    fn backup_round_trip() {
        let notes = collection(&["one", "two"]);
        let backup = make_backup(&notes);
        let json = serde_json::to_string_pretty(&backup).unwrap();
        assert!(json.contains("\"backupDate\""));
        assert!(json.contains("\"version\": \"1\""));

        let parsed = parse_backup(&json).unwrap();
        assert_eq!(parsed.notes.len(), 2);
        assert_eq!(parsed.version, BACKUP_VERSION);
    }

    #[test]
    fn merge_inserts_unknown_ids() {
        let mut notes = collection(&["existing"]);
        let incoming = collection(&["imported"]);
        let backup = make_backup(&incoming);

        let result = merge_backup(&mut notes, backup);
        assert_eq!(result.added.len(), 1);
        assert!(result.replaced.is_empty());
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn merge_overwrites_on_id_conflict() {
        let mut notes = collection(&["original"]);
        let id = notes.keys().next().unwrap().clone();

        let mut replacement = notes[&id].clone();
        replacement.title = "from backup".to_string();
        let backup = Backup {
            notes: vec![replacement],
            categories: None,
            version: BACKUP_VERSION.to_string(),
            backup_date: Utc::now(),
        };

        let result = merge_backup(&mut notes, backup);
        assert_eq!(result.replaced, vec![id.clone()]);
        assert_eq!(result.total(), 1);
        assert_eq!(notes[&id].title, "from backup");
    }

    #[test]
    fn imported_notes_are_marked_unsynced() {
        let mut notes = IndexMap::new();
        let mut synced = Note::new(NoteKind::Text, "s".into(), String::new());
        synced.synced = true;
        let backup = Backup {
            notes: vec![synced],
            categories: None,
            version: BACKUP_VERSION.to_string(),
            backup_date: Utc::now(),
        };
        merge_backup(&mut notes, backup);
        assert!(notes.values().all(|n| !n.synced));
    }

    #[test]
    fn foreign_backup_with_categories_parses() {
        let json = r#"{
            "notes": [{
                "id": "n1",
                "title": "from phone",
                "kind": "text",
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-02T00:00:00Z"
            }],
            "categories": [{"id": "c1", "name": "Work", "color": "blue"}],
            "version": "1",
            "backupDate": "2025-01-03T00:00:00Z"
        }"#;
        let backup = parse_backup(json).unwrap();
        assert!(backup.categories.is_some());
        assert_eq!(backup.notes[0].title, "from phone");
    }

    #[test]
    fn empty_backup_is_an_error() {
        let json = r#"{"notes": [], "version": "1", "backupDate": "2025-01-03T00:00:00Z"}"#;
        assert!(matches!(parse_backup(json), Err(BackupError::Empty)));
    }

    #[test]
    fn malformed_backup_is_an_error() {
        assert!(matches!(
            parse_backup("{\"oops\": true}"),
            Err(BackupError::ParseError(_))
        ));
    }
}
