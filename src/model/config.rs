use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the store directory
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub trash: TrashConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashConfig {
    /// Days a soft-deleted note is kept before permanent purge
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Apply retention purge every time the store is opened
    #[serde(default = "default_true")]
    pub auto_purge: bool,
}

impl Default for TrashConfig {
    fn default() -> Self {
        TrashConfig {
            retention_days: 30,
            auto_purge: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the remote document store
    #[serde(default)]
    pub url: String,
    /// Account the remote collection belongs to
    #[serde(default)]
    pub user: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub token: String,
    /// Seconds between background sync passes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            enabled: false,
            url: String::new(),
            user: String::new(),
            token: String::new(),
            interval_secs: 300,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    30
}

fn default_interval_secs() -> u64 {
    300
}
