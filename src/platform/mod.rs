// Passgen platform abstraction
// Provides platform-specific locations for the settings file and the history file.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Overrides the configuration directory when set.
pub const CONFIG_DIR_ENV: &str = "PASSGEN_CONFIG_DIR";

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "PASSGEN_DATA_DIR";

/// File name of the persisted history inside the data directory.
pub const HISTORY_FILE_NAME: &str = "password_history.json";

/// Returns the configuration directory for Passgen.
///
/// - **Override**: `$PASSGEN_CONFIG_DIR`
/// - **Linux**: `~/.config/passgen` (or `$XDG_CONFIG_HOME/passgen`)
/// - **macOS**: `~/Library/Application Support/Passgen`
/// - **Windows**: `%APPDATA%/Passgen`
pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = env_override(CONFIG_DIR_ENV) {
        return dir;
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the data directory for Passgen.
///
/// - **Override**: `$PASSGEN_DATA_DIR`
/// - **Linux**: `~/.local/share/passgen` (or `$XDG_DATA_HOME/passgen`)
/// - **macOS**: `~/Library/Application Support/Passgen`
/// - **Windows**: `%APPDATA%/Passgen`
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = env_override(DATA_DIR_ENV) {
        return dir;
    }
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Default location of the history file.
pub fn default_history_path() -> PathBuf {
    get_data_dir().join(HISTORY_FILE_NAME)
}

fn env_override(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
