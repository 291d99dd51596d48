use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- jot recovery log — append-only error recovery data
     This file captures data that jot couldn't save normally.
     If something went missing, check here.
     Safe to delete if empty or stale. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    Write,
    Backup,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Write => write!(f, "write"),
            RecoveryCategory::Backup => write!(f, "backup"),
        }
    }
}

/// A single entry appended to the recovery log.
#[derive(Debug)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    /// Key: value context lines
    pub fields: Vec<(String, String)>,
    /// The payload that failed to save, preserved verbatim
    pub body: String,
}

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} — {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push_str("\n---\n");
        out
    }
}

/// Write a file atomically: temp file in the same directory, then rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append an entry to `recovery.log` in the store directory.
///
/// Recovery logging is itself best-effort: if the log can't be written the
/// entry is printed to stderr as a last resort.
pub fn log_recovery(store_dir: &Path, entry: RecoveryEntry) {
    let log_path = store_dir.join("recovery.log");
    let is_new = !log_path.exists();

    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .and_then(|mut file| {
            if is_new {
                file.write_all(FILE_HEADER.as_bytes())?;
            }
            file.write_all(entry.to_markdown().as_bytes())
        });

    if let Err(e) = result {
        eprintln!("warning: could not write recovery log: {}", e);
        eprintln!("{}", entry.to_markdown());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_entry() -> RecoveryEntry {
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Write,
            description: "store write failed".to_string(),
            fields: vec![("Target".to_string(), "notes.json".to_string())],
            body: "[{\"id\":\"n1\"}]".to_string(),
        }
    }

    #[test]
    fn atomic_write_creates_and_replaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.json");

        atomic_write(&path, b"first").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        atomic_write(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn log_recovery_appends_with_header_once() {
        let tmp = TempDir::new().unwrap();

        log_recovery(tmp.path(), sample_entry());
        log_recovery(tmp.path(), sample_entry());

        let content = fs::read_to_string(tmp.path().join("recovery.log")).unwrap();
        assert_eq!(content.matches("jot recovery log").count(), 1);
        assert_eq!(content.matches("store write failed").count(), 2);
        assert!(content.contains("Target: notes.json"));
        assert!(content.contains("```text"));
    }
}
