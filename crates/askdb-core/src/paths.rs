//! Common filesystem paths used by askdb.

use std::path::PathBuf;

/// Base directory for askdb state (config, logs).
///
/// Defaults to `~/.config/askdb`, but can be overridden via `ASKDB_DIR` for
/// testing or multi-instance setups.
pub fn askdb_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ASKDB_DIR") {
        return PathBuf::from(dir);
    }

    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config").join("askdb")
}

/// Path to the askdb configuration file.
pub fn config_path() -> PathBuf {
    askdb_dir().join("config.toml")
}

/// Path to the TUI log file.
pub fn tui_log_path() -> PathBuf {
    askdb_dir().join("askdb-tui.log")
}

#[doc(hidden)]
pub fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
