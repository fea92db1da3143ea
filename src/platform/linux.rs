// Passgen platform paths for Linux
// Config: ~/.config/passgen
// Data:   ~/.local/share/passgen

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/passgen` if set, otherwise `~/.config/passgen`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("passgen"),
        Err(_) => home_dir().join(".config").join("passgen"),
    }
}

/// Uses `$XDG_DATA_HOME/passgen` if set, otherwise `~/.local/share/passgen`.
pub fn get_data_dir() -> PathBuf {
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("passgen"),
        Err(_) => home_dir().join(".local").join("share").join("passgen"),
    }
}
