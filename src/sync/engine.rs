use chrono::Utc;

use crate::io::store::Store;
use crate::model::note::Note;
use crate::sync::remote::RemoteStore;

/// Result of one sync pass
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Remote notes inserted locally
    pub pulled_new: usize,
    /// Remote notes that replaced a local copy
    pub pulled_updated: usize,
    /// Local notes removed because their remote document is gone
    pub removed: usize,
    /// Local notes pushed to the remote
    pub pushed: usize,
    /// Tombstones deleted remotely
    pub deleted_remote: usize,
    /// Remote calls that failed (logged and skipped)
    pub errors: usize,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.pulled_new == 0
            && self.pulled_updated == 0
            && self.removed == 0
            && self.pushed == 0
            && self.deleted_remote == 0
            && self.errors == 0
    }
}

/// Run a full sync pass: migrate-if-empty, pull-merge, then push.
///
/// Remote failures are logged and counted, never fatal; whatever state
/// couldn't be reconciled stays stale until a later pass. `last_sync` is
/// recorded only when the pass completed without errors.
pub fn sync_once(store: &mut Store, remote: &dyn RemoteStore) -> SyncReport {
    let mut report = SyncReport::default();

    match remote.fetch_all() {
        Ok(remote_notes) => {
            if remote_notes.is_empty()
                && !store.notes.is_empty()
                && store.sync_state.last_sync.is_none()
            {
                // First sync against an empty remote: one-time migration.
                // Everything local becomes a push candidate.
                log::info!(
                    "remote collection is empty, migrating {} local notes",
                    store.notes.len()
                );
                for note in store.notes.values_mut() {
                    note.synced = false;
                }
            } else {
                pull_merge(store, remote_notes, &mut report);
            }
        }
        Err(e) => {
            log::warn!("fetch from remote failed: {}", e);
            report.errors += 1;
        }
    }

    push_pending(store, remote, &mut report);

    if report.errors == 0 {
        store.sync_state.last_sync = Some(Utc::now());
    }
    log::info!(
        "sync pass: +{} new, {} updated, {} removed, {} pushed, {} deleted remotely, {} errors",
        report.pulled_new,
        report.pulled_updated,
        report.removed,
        report.pushed,
        report.deleted_remote,
        report.errors
    );
    report
}

/// Push local changes only: unsynced notes and pending tombstones.
/// Used by the daemon when a local write is detected between full passes.
pub fn push_once(store: &mut Store, remote: &dyn RemoteStore) -> SyncReport {
    let mut report = SyncReport::default();
    push_pending(store, remote, &mut report);
    report
}

// ---------------------------------------------------------------------------
// Pull
// ---------------------------------------------------------------------------

/// Merge the remote collection into the local one, last writer wins.
fn pull_merge(store: &mut Store, remote_notes: Vec<Note>, report: &mut SyncReport) {
    let mut remote_ids: Vec<String> = Vec::with_capacity(remote_notes.len());

    for mut incoming in remote_notes {
        remote_ids.push(incoming.id.clone());

        // A purged-but-not-yet-propagated note must not resurrect
        if store.sync_state.pending_deletes.contains(&incoming.id) {
            continue;
        }

        incoming.synced = true;
        let take = match store.notes.get(&incoming.id) {
            None => {
                report.pulled_new += 1;
                true
            }
            // No local edits: mirror the remote copy
            Some(local) if local.synced => {
                let changed = incoming.updated_at != local.updated_at;
                if changed {
                    report.pulled_updated += 1;
                }
                changed
            }
            // Both sides changed: newer updated_at wins, ties keep local
            Some(local) => {
                let newer = incoming.updated_at > local.updated_at;
                if newer {
                    report.pulled_updated += 1;
                }
                newer
            }
        };
        if take {
            store.notes.insert(incoming.id.clone(), incoming);
        }
    }

    // A synced local note missing from the remote was deleted remotely
    let gone: Vec<String> = store
        .notes
        .values()
        .filter(|n| n.synced && !remote_ids.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();
    for id in gone {
        store.notes.shift_remove(&id);
        report.removed += 1;
    }
}

// ---------------------------------------------------------------------------
// Push
// ---------------------------------------------------------------------------

fn push_pending(store: &mut Store, remote: &dyn RemoteStore, report: &mut SyncReport) {
    let dirty: Vec<String> = store
        .notes
        .values()
        .filter(|n| !n.synced)
        .map(|n| n.id.clone())
        .collect();

    for id in dirty {
        let note = store.notes.get(&id).expect("collected from the map");
        match remote.upsert(note) {
            Ok(()) => {
                store.notes.get_mut(&id).expect("still present").synced = true;
                report.pushed += 1;
            }
            Err(e) => {
                log::warn!("push of note {} failed: {}", id, e);
                report.errors += 1;
            }
        }
    }

    let tombstones = store.sync_state.pending_deletes.clone();
    for id in tombstones {
        match remote.delete(&id) {
            Ok(()) => {
                store.sync_state.pending_deletes.retain(|t| t != &id);
                report.deleted_remote += 1;
            }
            Err(e) => {
                log::warn!("remote delete of note {} failed: {}", id, e);
                report.errors += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
