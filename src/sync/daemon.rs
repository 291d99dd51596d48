use std::path::Path;
use std::time::{Duration, Instant};

use crate::io::lock::StoreLock;
use crate::io::store::Store;
use crate::io::watcher::StoreWatcher;
use crate::model::config::Config;
use crate::ops::trash;
use crate::sync::engine::{self, SyncReport};
use crate::sync::remote::RemoteStore;

/// Error type for the sync daemon
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("could not watch store directory: {0}")]
    Watch(#[from] notify::Error),
    #[error(transparent)]
    Store(#[from] crate::io::store::StoreError),
    #[error(transparent)]
    Lock(#[from] crate::io::lock::LockError),
}

/// Run the sync daemon until the process is killed.
///
/// A full sync pass runs immediately and then on every interval tick; a
/// change to notes.json by another process triggers a push-only pass in
/// between, so local edits reach the remote without waiting for the tick.
pub fn run(store_dir: &Path, config: &Config, remote: &dyn RemoteStore) -> Result<(), DaemonError> {
    let interval = Duration::from_secs(config.sync.interval_secs.max(1));
    let watcher = StoreWatcher::start(store_dir)?;
    log::info!(
        "sync daemon watching {} (interval {}s)",
        store_dir.display(),
        interval.as_secs()
    );

    let mut next_full = Instant::now();
    loop {
        let now = Instant::now();
        if now >= next_full {
            run_pass(store_dir, config, remote, PassKind::Full)?;
            next_full = Instant::now() + interval;
            // The pass itself rewrote notes.json; don't react to our own write
            watcher.poll();
            continue;
        }

        if watcher.wait(next_full - now).is_some() {
            watcher.poll();
            run_pass(store_dir, config, remote, PassKind::PushOnly)?;
            watcher.poll();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassKind {
    Full,
    PushOnly,
}

/// Load the store under the lock, run one engine pass, and save.
/// Store-level failures abort the daemon; remote failures are already
/// swallowed inside the engine.
fn run_pass(
    store_dir: &Path,
    config: &Config,
    remote: &dyn RemoteStore,
    kind: PassKind,
) -> Result<SyncReport, DaemonError> {
    let _lock = StoreLock::acquire_default(store_dir)?;
    let mut store = Store::load(store_dir)?;

    if config.trash.auto_purge {
        let purged = trash::purge_expired(&mut store, config.trash.retention_days);
        if !purged.is_empty() {
            log::info!("auto-purged {} expired notes from trash", purged.purged.len());
        }
    }

    let report = match kind {
        PassKind::Full => engine::sync_once(&mut store, remote),
        PassKind::PushOnly => engine::push_once(&mut store, remote),
    };

    store.save()?;
    Ok(report)
}
