use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for config I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read the store config. A missing file means defaults.
pub fn read_config(store_dir: &Path) -> Result<Config, ConfigError> {
    let path = store_dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Read the config along with its raw toml_edit document for
/// round-trip-safe editing.
pub fn read_config_doc(
    store_dir: &Path,
) -> Result<(Config, toml_edit::DocumentMut), ConfigError> {
    let path = store_dir.join("config.toml");
    let text = if path.exists() {
        fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?
    } else {
        String::new()
    };
    let config: Config = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(store_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let path = store_dir.join("config.toml");
    fs::write(&path, doc.to_string()).map_err(|e| ConfigError::ReadError { path, source: e })?;
    Ok(())
}

/// Set a dotted `section.key` to a string-ish value in the document.
/// Booleans and integers are written as their TOML types.
pub fn set_key(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

    let known = matches!(
        (section, field),
        ("trash", "retention_days" | "auto_purge")
            | ("sync", "enabled" | "url" | "user" | "token" | "interval_secs")
    );
    if !known {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let item = if let Ok(b) = value.parse::<bool>() {
        toml_edit::value(b)
    } else if let Ok(n) = value.parse::<i64>() {
        toml_edit::value(n)
    } else {
        toml_edit::value(value)
    };

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[section][field] = item;
    Ok(())
}

/// Look up a dotted `section.key` in the parsed config, as a display string.
pub fn get_key(config: &Config, key: &str) -> Option<String> {
    match key {
        "trash.retention_days" => Some(config.trash.retention_days.to_string()),
        "trash.auto_purge" => Some(config.trash.auto_purge.to_string()),
        "sync.enabled" => Some(config.sync.enabled.to_string()),
        "sync.url" => Some(config.sync.url.clone()),
        "sync.user" => Some(config.sync.user.clone()),
        "sync.token" => Some(config.sync.token.clone()),
        "sync.interval_secs" => Some(config.sync.interval_secs.to_string()),
        _ => None,
    }
}
