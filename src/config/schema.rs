use std::env;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/attacca/config.toml` or
/// `~/.config/attacca/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ATTACCA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub storage: StorageSettings,
    pub picker: PickerSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when listing a playlist folder.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "flac".into(),
                "aac".into(),
                "m4a".into(),
                "ogg".into(),
            ],
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one subdirectory per username.
    pub data_dir: PathBuf,
    /// The user whose library this session operates on.
    pub username: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            username: default_username(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    /// External folder-selection dialog: program plus arguments. The chosen
    /// path is read from its stdout.
    pub command: Vec<String>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            command: vec![
                "zenity".into(),
                "--file-selection".into(),
                "--directory".into(),
            ],
        }
    }
}

/// Default data directory under `$XDG_DATA_HOME/attacca` or
/// `~/.local/share/attacca`.
pub fn default_data_dir() -> PathBuf {
    if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("attacca");
    }
    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".local").join("share").join("attacca");
    }
    PathBuf::from(".attacca")
}

/// Username for the session, from `$USER` with a fixed fallback.
pub fn default_username() -> String {
    env::var("USER").unwrap_or_else(|_| "local".to_string())
}
