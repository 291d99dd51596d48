use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::note::Note;

/// Error type for store I/O operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a jot store: {0} does not exist (run `jot init`)")]
    NotAStore(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is corrupted: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Sync bookkeeping persisted to sync.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// Ids of purged notes whose remote documents still need deleting
    #[serde(default)]
    pub pending_deletes: Vec<String>,
    /// Last successful sync pass
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}

/// The loaded store: the note collection plus sync bookkeeping.
///
/// Notes are kept in an id-keyed map that preserves insertion order, so a
/// load/merge/save cycle doesn't reshuffle the collection on disk.
#[derive(Debug)]
pub struct Store {
    pub dir: PathBuf,
    pub notes: IndexMap<String, Note>,
    pub sync_state: SyncState,
}

/// Resolve the store directory: explicit override, then `$JOT_DATA_DIR`,
/// then `$XDG_DATA_HOME/jot`, then `~/.local/share/jot`.
pub fn store_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var("JOT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    data_home.join("jot")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

impl Store {
    /// Load the store from a directory. Requires the directory to exist
    /// (`jot init` creates it); tolerates missing notes.json and sync.json.
    pub fn load(dir: &Path) -> Result<Store, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::NotAStore(dir.to_path_buf()));
        }

        let notes_path = dir.join("notes.json");
        let notes = if notes_path.exists() {
            let text = fs::read_to_string(&notes_path).map_err(|e| StoreError::ReadError {
                path: notes_path.clone(),
                source: e,
            })?;
            let list: Vec<Note> =
                serde_json::from_str(&text).map_err(|e| StoreError::ParseError {
                    path: notes_path.clone(),
                    source: e,
                })?;
            list.into_iter().map(|n| (n.id.clone(), n)).collect()
        } else {
            IndexMap::new()
        };

        let sync_path = dir.join("sync.json");
        let sync_state = if sync_path.exists() {
            let text = fs::read_to_string(&sync_path).map_err(|e| StoreError::ReadError {
                path: sync_path.clone(),
                source: e,
            })?;
            serde_json::from_str(&text).map_err(|e| StoreError::ParseError {
                path: sync_path,
                source: e,
            })?
        } else {
            SyncState::default()
        };

        Ok(Store {
            dir: dir.to_path_buf(),
            notes,
            sync_state,
        })
    }

    /// Save notes.json atomically. On write failure the serialized payload
    /// goes to the recovery log before the error is returned.
    pub fn save_notes(&self) -> Result<(), StoreError> {
        let path = self.dir.join("notes.json");
        let list: Vec<&Note> = self.notes.values().collect();
        let content = serde_json::to_string_pretty(&list).map_err(|e| StoreError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        if let Err(e) = recovery::atomic_write(&path, content.as_bytes()) {
            recovery::log_recovery(
                &self.dir,
                RecoveryEntry {
                    timestamp: Utc::now(),
                    category: RecoveryCategory::Write,
                    description: "notes write failed".to_string(),
                    fields: vec![("Error".to_string(), e.to_string())],
                    body: content,
                },
            );
            return Err(StoreError::WriteError { path, source: e });
        }
        Ok(())
    }

    /// Save sync.json atomically.
    pub fn save_sync_state(&self) -> Result<(), StoreError> {
        let path = self.dir.join("sync.json");
        let content =
            serde_json::to_string_pretty(&self.sync_state).map_err(|e| StoreError::ParseError {
                path: path.clone(),
                source: e,
            })?;
        recovery::atomic_write(&path, content.as_bytes())
            .map_err(|e| StoreError::WriteError { path, source: e })
    }

    /// Save everything.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_notes()?;
        self.save_sync_state()
    }
}
