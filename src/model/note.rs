use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::task::Schedule;

/// What kind of entry a note is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Text,
    Checklist,
    Task,
}

impl NoteKind {
    /// Short label used in list output
    pub fn label(self) -> &'static str {
        match self {
            NoteKind::Text => "text",
            NoteKind::Checklist => "checklist",
            NoteKind::Task => "task",
        }
    }

    /// Parse a kind name (as accepted on the command line)
    pub fn parse(s: &str) -> Option<NoteKind> {
        match s {
            "text" => Some(NoteKind::Text),
            "checklist" => Some(NoteKind::Checklist),
            "task" => Some(NoteKind::Task),
            _ => None,
        }
    }
}

/// A single checklist entry inside a checklist note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(text: String) -> Self {
        ChecklistItem {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            done: false,
        }
    }
}

/// A note: the single persisted entity.
///
/// Field names serialize as camelCase to stay compatible with the JSON
/// backup interchange format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique id (UUID v4, assigned at creation)
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub kind: NoteKind,
    /// Checklist entries (empty unless `kind` is `Checklist`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ChecklistItem>,
    /// Scheduling metadata (task notes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    /// Color tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub hidden: bool,
    /// Task completion
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-delete state — deleted notes live in the trash until purge
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Whether the last known local state matches the remote store
    #[serde(default)]
    pub synced: bool,
}

impl Note {
    /// Create a new note of the given kind, stamped now, unsynced
    pub fn new(kind: NoteKind, title: String, content: String) -> Self {
        let now = Utc::now();
        Note {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            content,
            kind,
            items: Vec::new(),
            schedule: None,
            color: None,
            favorite: false,
            hidden: false,
            done: false,
            completed_at: None,
            deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
            synced: false,
        }
    }

    /// Record a local mutation: bump `updated_at` and clear the sync flag
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.synced = false;
    }

    /// Whether this note appears in active views
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_is_unsynced_and_active() {
        let note = Note::new(NoteKind::Text, "Groceries".into(), "milk".into());
        assert!(!note.synced);
        assert!(note.is_active());
        assert!(!note.deleted);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn touch_bumps_updated_and_clears_sync() {
        let mut note = Note::new(NoteKind::Text, "a".into(), String::new());
        note.synced = true;
        let before = note.updated_at;
        note.touch();
        assert!(!note.synced);
        assert!(note.updated_at >= before);
    }

    #[test]
    fn ids_are_unique() {
        let a = Note::new(NoteKind::Text, "a".into(), String::new());
        let b = Note::new(NoteKind::Text, "b".into(), String::new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serde_camel_case_field_names() {
        let note = Note::new(NoteKind::Task, "t".into(), String::new());
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"kind\":\"task\""));
        assert!(!json.contains("created_at"));
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        // Only id/title/kind/timestamps are required; flags default off
        let json = r#"{
            "id": "n1",
            "title": "minimal",
            "kind": "text",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.content, "");
        assert!(note.items.is_empty());
        assert!(note.schedule.is_none());
        assert!(!note.favorite);
        assert!(!note.deleted);
        assert!(!note.synced);
    }

    #[test]
    fn kind_parse_round_trip() {
        for kind in [NoteKind::Text, NoteKind::Checklist, NoteKind::Task] {
            assert_eq!(NoteKind::parse(kind.label()), Some(kind));
        }
        assert_eq!(NoteKind::parse("calendar"), None);
    }
}
