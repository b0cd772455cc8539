//! Runtime configuration
//!
//! Resolved from the environment, falling back to the platform data directory.

use std::env;
use std::path::PathBuf;

/// Overrides the data directory
pub const DATA_DIR_ENV: &str = "WHATNEXT_DATA_DIR";
/// Overrides the preference store name
pub const STORE_NAME_ENV: &str = "WHATNEXT_STORE";

/// Default preference store name
pub const DEFAULT_STORE_NAME: &str = "whatnext_prefs";
/// Log file name, created inside the data directory
pub const LOG_FILE_NAME: &str = "whatnext.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the store and the log file
    pub data_dir: PathBuf,
    /// Store name (file stem of the store file)
    pub store_name: String,
}

impl Config {
    /// Build a config from `WHATNEXT_DATA_DIR` / `WHATNEXT_STORE`
    pub fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(store_directory);
        let store_name = env::var(STORE_NAME_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string());

        Self { data_dir, store_name }
    }

    /// Config rooted at an explicit directory
    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

/// Platform data directory for the app
pub fn store_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "whatnext", "Whatnext") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        // Fallback to current directory
        PathBuf::from("./whatnext-data")
    }
}
