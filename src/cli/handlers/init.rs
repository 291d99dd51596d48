use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;

const CONFIG_TEMPLATE: &str = r#"# jot configuration

[trash]
# Days a deleted note stays in the trash before permanent purge.
retention_days = 30
# Apply the retention purge automatically whenever the store is opened.
auto_purge = true

[sync]
# Mirror notes to a remote document store. Point url at the server,
# set user to your account id, and token to a bearer token.
enabled = false
url = ""
user = ""
token = ""
# Seconds between background sync passes (`jot sync watch`).
interval_secs = 300
"#;

pub fn cmd_init(store_dir: &Path, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = store_dir.join("config.toml");

    if config_path.exists() && !args.force {
        return Err(format!(
            "store already initialized at {} (use --force to reinitialize)",
            store_dir.display()
        )
        .into());
    }

    fs::create_dir_all(store_dir)?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    println!("Initialized jot store: {}", store_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_dir_and_config() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("store");
        cmd_init(&dir, InitArgs { force: false }).unwrap();
        assert!(dir.join("config.toml").exists());

        let config = crate::io::config_io::read_config(&dir).unwrap();
        assert_eq!(config.trash.retention_days, 30);
        assert!(!config.sync.enabled);
    }

    #[test]
    fn init_refuses_to_clobber_without_force() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_path_buf();
        cmd_init(&dir, InitArgs { force: false }).unwrap();
        assert!(cmd_init(&dir, InitArgs { force: false }).is_err());
        assert!(cmd_init(&dir, InitArgs { force: true }).is_ok());
    }
}
