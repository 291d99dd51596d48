use chrono::{Duration, Utc};

use crate::io::store::Store;
use crate::ops::note_ops::{NoteError, resolve_id};

/// A note removed by a purge.
#[derive(Debug, Clone)]
pub struct PurgedNote {
    pub id: String,
    pub title: String,
}

/// Result of a purge operation
#[derive(Debug, Default)]
pub struct PurgeResult {
    pub purged: Vec<PurgedNote>,
}

impl PurgeResult {
    pub fn is_empty(&self) -> bool {
        self.purged.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Soft delete / restore
// ---------------------------------------------------------------------------

/// Soft-delete a note into the trash.
pub fn delete_note(store: &mut Store, id: &str) -> Result<String, NoteError> {
    let id = resolve_id(&store.notes, id)?;
    let note = store.notes.get_mut(&id).expect("resolved id exists");
    note.deleted = true;
    note.deleted_at = Some(Utc::now());
    note.touch();
    Ok(id)
}

/// Restore a soft-deleted note.
pub fn restore_note(store: &mut Store, id: &str) -> Result<String, NoteError> {
    let id = resolve_id(&store.notes, id)?;
    let note = store.notes.get_mut(&id).expect("resolved id exists");
    if !note.deleted {
        return Err(NoteError::NotFound(id));
    }
    note.deleted = false;
    note.deleted_at = None;
    note.touch();
    Ok(id)
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

/// Permanently remove soft-deleted notes older than the retention window.
/// Purged ids become sync tombstones so the deletion reaches the remote
/// store on the next push.
pub fn purge_expired(store: &mut Store, retention_days: u32) -> PurgeResult {
    let cutoff = Utc::now() - Duration::days(retention_days as i64);
    let expired: Vec<String> = store
        .notes
        .values()
        .filter(|n| {
            n.deleted
                && match n.deleted_at {
                    Some(at) => at < cutoff,
                    // Legacy deleted notes without a timestamp purge immediately
                    None => true,
                }
        })
        .map(|n| n.id.clone())
        .collect();

    remove_ids(store, &expired)
}

/// Permanently remove every trashed note regardless of age.
pub fn empty_trash(store: &mut Store) -> PurgeResult {
    let trashed: Vec<String> = store
        .notes
        .values()
        .filter(|n| n.deleted)
        .map(|n| n.id.clone())
        .collect();

    remove_ids(store, &trashed)
}

fn remove_ids(store: &mut Store, ids: &[String]) -> PurgeResult {
    let mut result = PurgeResult::default();
    for id in ids {
        if let Some(note) = store.notes.shift_remove(id) {
            if !store.sync_state.pending_deletes.contains(id) {
                store.sync_state.pending_deletes.push(id.clone());
            }
            result.purged.push(PurgedNote {
                id: note.id,
                title: note.title,
            });
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
