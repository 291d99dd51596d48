use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::note::Note;
use crate::ops::import::ImportResult;
use crate::ops::query::StoreStats;
use crate::ops::search::SearchHit;
use crate::ops::trash::PurgeResult;
use crate::sync::engine::SyncReport;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct NoteJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub favorite: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    pub updated: DateTime<Utc>,
    pub synced: bool,
}

#[derive(Serialize)]
pub struct ItemJson<'a> {
    pub index: usize,
    pub text: &'a str,
    pub done: bool,
}

impl<'a> NoteJson<'a> {
    pub fn from_note(note: &'a Note) -> Self {
        let schedule = note.schedule.as_ref();
        NoteJson {
            id: &note.id,
            title: &note.title,
            kind: note.kind.label(),
            content: &note.content,
            color: note.color.as_deref(),
            favorite: note.favorite,
            hidden: note.hidden,
            done: note.done,
            items: note
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| ItemJson {
                    index,
                    text: &item.text,
                    done: item.done,
                })
                .collect(),
            due: schedule.and_then(|s| s.due_at),
            priority: schedule.map(|s| s.priority.label()),
            location: schedule.and_then(|s| s.location.as_deref()),
            updated: note.updated_at,
            synced: note.synced,
        }
    }
}

#[derive(Serialize)]
pub struct NoteListJson<'a> {
    pub notes: Vec<NoteJson<'a>>,
}

#[derive(Serialize)]
pub struct SearchHitJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub field: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<usize>,
    pub text: &'a str,
    pub spans: Vec<[usize; 2]>,
}

impl<'a> SearchHitJson<'a> {
    pub fn from_hit(hit: &'a SearchHit, title: &'a str) -> Self {
        SearchHitJson {
            id: &hit.note_id,
            title,
            field: hit.field.label(),
            item: hit.item_index,
            text: &hit.text,
            spans: hit.spans.iter().map(|r| [r.start, r.end]).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct AgendaJson<'a> {
    pub overdue: Vec<NoteJson<'a>>,
    pub days: Vec<AgendaDayJson<'a>>,
}

#[derive(Serialize)]
pub struct AgendaDayJson<'a> {
    pub date: String,
    pub notes: Vec<NoteJson<'a>>,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub text: usize,
    pub checklist: usize,
    pub task: usize,
    pub favorites: usize,
    pub hidden: usize,
    pub tasks_open: usize,
    pub tasks_done: usize,
    pub trashed: usize,
    pub unsynced: usize,
}

impl StatsJson {
    pub fn from_stats(s: &StoreStats) -> Self {
        StatsJson {
            text: s.text,
            checklist: s.checklist,
            task: s.task,
            favorites: s.favorites,
            hidden: s.hidden,
            tasks_open: s.tasks_open,
            tasks_done: s.tasks_done,
            trashed: s.trashed,
            unsynced: s.unsynced,
        }
    }
}

#[derive(Serialize)]
pub struct ImportJson {
    pub added: usize,
    pub replaced: usize,
}

impl ImportJson {
    pub fn from_result(r: &ImportResult) -> Self {
        ImportJson {
            added: r.added.len(),
            replaced: r.replaced.len(),
        }
    }
}

#[derive(Serialize)]
pub struct PurgeJson {
    pub purged: usize,
}

impl PurgeJson {
    pub fn from_result(r: &PurgeResult) -> Self {
        PurgeJson {
            purged: r.purged.len(),
        }
    }
}

#[derive(Serialize)]
pub struct SyncReportJson {
    pub pulled_new: usize,
    pub pulled_updated: usize,
    pub removed: usize,
    pub pushed: usize,
    pub deleted_remote: usize,
    pub errors: usize,
}

impl SyncReportJson {
    pub fn from_report(r: &SyncReport) -> Self {
        SyncReportJson {
            pulled_new: r.pulled_new,
            pulled_updated: r.pulled_updated,
            removed: r.removed,
            pushed: r.pushed,
            deleted_remote: r.deleted_remote,
            errors: r.errors,
        }
    }
}

#[derive(Serialize)]
pub struct SyncStatusJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    pub unsynced: usize,
    pub pending_deletes: usize,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Human output helpers
// ---------------------------------------------------------------------------

/// Short id prefix for human-readable listings.
pub fn short_id(id: &str) -> &str {
    if id.len() > 8 { &id[..8] } else { id }
}

/// One-line human rendering of a note for listings.
pub fn note_line(note: &Note) -> String {
    let mut flags = String::new();
    if note.favorite {
        flags.push('*');
    }
    if note.hidden {
        flags.push('~');
    }
    if note.done {
        flags.push('x');
    }
    let mut line = format!(
        "{}  [{}] {}{}",
        short_id(&note.id),
        note.kind.label(),
        note.title,
        if flags.is_empty() {
            String::new()
        } else {
            format!(" ({})", flags)
        }
    );
    if let Some(color) = &note.color {
        line.push_str(&format!(" #{}", color));
    }
    if let Some(due) = note.schedule.as_ref().and_then(|s| s.due_at) {
        line.push_str(&format!(" due {}", due.format("%Y-%m-%d %H:%M")));
    }
    line
}
