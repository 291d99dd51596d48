use chrono::{DateTime, Utc};

use crate::model::note::{Note, NoteKind};

/// Sort key for note listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently updated first
    #[default]
    Updated,
    /// Most recently created first
    Created,
    /// Title, case-insensitive ascending
    Title,
    /// Due date ascending; notes without a due date sort last
    Due,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "updated" => Some(SortKey::Updated),
            "created" => Some(SortKey::Created),
            "title" => Some(SortKey::Title),
            "due" => Some(SortKey::Due),
            _ => None,
        }
    }
}

/// A transient listing query, built from CLI flags per invocation.
/// Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// Case-insensitive substring over title and content
    pub query: Option<String>,
    pub kind: Option<NoteKind>,
    pub color: Option<String>,
    /// `Some(true)` = favorites only
    pub favorite: Option<bool>,
    /// Hidden notes are excluded unless set
    pub include_hidden: bool,
    /// Only notes updated at or after this instant
    pub updated_after: Option<DateTime<Utc>>,
    /// Only notes updated before this instant
    pub updated_before: Option<DateTime<Utc>>,
    pub sort: SortKey,
}

impl Filter {
    /// Whether an active note passes this filter. Deleted notes never match;
    /// the trash has its own views.
    pub fn matches(&self, note: &Note) -> bool {
        if note.deleted {
            return false;
        }
        if note.hidden && !self.include_hidden {
            return false;
        }
        if let Some(kind) = self.kind
            && note.kind != kind
        {
            return false;
        }
        if let Some(ref color) = self.color
            && note.color.as_deref() != Some(color.as_str())
        {
            return false;
        }
        if let Some(fav) = self.favorite
            && note.favorite != fav
        {
            return false;
        }
        if let Some(after) = self.updated_after
            && note.updated_at < after
        {
            return false;
        }
        if let Some(before) = self.updated_before
            && note.updated_at >= before
        {
            return false;
        }
        if let Some(ref q) = self.query {
            let q = q.to_lowercase();
            if !note.title.to_lowercase().contains(&q) && !note.content.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }
}

/// Order notes according to a sort key.
pub fn sort_notes(notes: &mut [&Note], sort: SortKey) {
    match sort {
        SortKey::Updated => notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortKey::Created => notes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Title => {
            notes.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortKey::Due => notes.sort_by(|a, b| {
            let da = a.schedule.as_ref().and_then(|s| s.due_at);
            let db = b.schedule.as_ref().and_then(|s| s.due_at);
            match (da, db) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => b.updated_at.cmp(&a.updated_at),
            }
        }),
    }
}
