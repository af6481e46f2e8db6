//! Configuration module for dashboard settings.
//!
//! # Module Structure
//!
//! - `loader`: settings file location, JSON load/save and path validation
//!
//! # Settings Management
//!
//! `SettingsManager` reads and writes `AppState` at the global settings path.
//! A missing file yields defaults; an unparsable one logs a warning and also
//! yields defaults so a stale settings format never blocks startup.

pub mod loader;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Maximum number of entries kept in the recent-files list
pub const MAX_RECENT_FILES: usize = 8;

/// Persistent user settings
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppState {
    /// Directory the open dialog starts in
    pub last_open_dir: String,
    /// Recently opened results files, most recent first
    pub recent_files: Vec<String>,
    /// Reopen the most recent file at launch when no path is given
    pub open_last_on_startup: bool,

    // Window
    pub window_width: f32,
    pub window_height: f32,
    pub dark_mode: bool,

    /// Max log level: "error", "warn", "info", "debug" or "trace"
    pub log_level: String,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            last_open_dir: String::new(),
            recent_files: Vec::new(),
            open_last_on_startup: false,
            window_width: 1280.0,
            window_height: 860.0,
            dark_mode: true,
            log_level: "info".to_string(),
        }
    }
}

impl AppState {
    /// Record a successfully opened file: moves it to the front, drops
    /// duplicates, trims to `MAX_RECENT_FILES`, and remembers its directory.
    pub fn push_recent_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let entry = path.to_string_lossy().to_string();
        self.recent_files.retain(|existing| existing != &entry);
        self.recent_files.insert(0, entry);
        self.recent_files.truncate(MAX_RECENT_FILES);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.last_open_dir = parent.to_string_lossy().to_string();
            }
        }
    }

    /// Drop a recent entry that no longer loads
    pub fn forget_recent_file(&mut self, path: impl AsRef<Path>) {
        let entry = path.as_ref().to_string_lossy().to_string();
        self.recent_files.retain(|existing| existing != &entry);
    }

    pub fn most_recent_file(&self) -> Option<PathBuf> {
        self.recent_files.first().map(PathBuf::from)
    }

    /// Start directory for the open dialog, if it still exists
    pub fn open_dir(&self) -> Option<PathBuf> {
        if self.last_open_dir.is_empty() {
            return None;
        }
        let dir = PathBuf::from(&self.last_open_dir);
        dir.is_dir().then_some(dir)
    }

    /// Parsed log level; unknown strings fall back to Info
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info)
    }
}

/// Settings persistence at the global settings path
pub struct SettingsManager;

impl SettingsManager {
    /// Load AppState from the global settings file, or defaults if it doesn't exist.
    ///
    /// Also returns the resolved path so later saves go to the same file.
    pub fn load() -> Result<(AppState, PathBuf), ConfigError> {
        let path = loader::get_global_settings_path()?;
        Ok((Self::load_from(&path), path))
    }

    /// Load from an explicit path, never failing: missing or broken files give defaults
    pub fn load_from(path: &Path) -> AppState {
        match loader::load_settings_from_file(path) {
            Ok(state) => state,
            Err(ConfigError::FileNotFound(_)) => AppState::default(),
            Err(e) => {
                log::warn!(
                    "[Config] Failed to read {}, falling back to defaults: {}",
                    path.display(),
                    e
                );
                AppState::default()
            }
        }
    }

    pub fn save_to(state: &AppState, path: &Path) -> Result<(), ConfigError> {
        loader::save_settings_to_file(state, path)?;
        log::debug!("[Config] Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(state.recent_files.is_empty());
        assert!(state.dark_mode);
        assert_eq!(state.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_push_recent_file_dedups_and_orders() {
        let mut state = AppState::default();
        state.push_recent_file("/a/one.json");
        state.push_recent_file("/b/two.json");
        state.push_recent_file("/a/one.json");
        assert_eq!(state.recent_files, vec!["/a/one.json", "/b/two.json"]);
        assert_eq!(state.last_open_dir, "/a");
        assert_eq!(state.most_recent_file(), Some(PathBuf::from("/a/one.json")));
    }

    #[test]
    fn test_push_recent_file_trims() {
        let mut state = AppState::default();
        for i in 0..(MAX_RECENT_FILES + 3) {
            state.push_recent_file(format!("/r/{}.json", i));
        }
        assert_eq!(state.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(state.recent_files[0], format!("/r/{}.json", MAX_RECENT_FILES + 2));
    }

    #[test]
    fn test_forget_recent_file() {
        let mut state = AppState::default();
        state.push_recent_file("/a/one.json");
        state.forget_recent_file("/a/one.json");
        assert!(state.recent_files.is_empty());
    }

    #[test]
    fn test_level_filter_parsing() {
        let mut state = AppState::default();
        state.log_level = "debug".to_string();
        assert_eq!(state.level_filter(), log::LevelFilter::Debug);
        state.log_level = "chatty".to_string();
        assert_eq!(state.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_load_from_falls_back_on_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert_eq!(SettingsManager::load_from(&path), AppState::default());
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"dark_mode": false}"#).unwrap();
        let state = SettingsManager::load_from(&path);
        assert!(!state.dark_mode);
        assert_eq!(state.window_width, AppState::default().window_width);
    }

    #[test]
    fn test_save_to_and_load_from() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg/settings.json");
        let mut state = AppState::default();
        state.open_last_on_startup = true;
        SettingsManager::save_to(&state, &path).unwrap();
        assert_eq!(SettingsManager::load_from(&path), state);
    }
}
