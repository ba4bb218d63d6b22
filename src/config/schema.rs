use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/andante/config.toml` or `~/.config/andante/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ANDANTE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timer: TimerSettings,
    pub playback: PlaybackSettings,
    pub storage: StorageSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Session length the timer resets to after each session (minutes).
    pub default_minutes: u32,
    /// Preset durations bound to the number keys (minutes).
    pub presets: Vec<u32>,
    /// Upper bound accepted by the custom-duration prompt (minutes).
    pub max_custom_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_minutes: 25,
            presets: vec![5, 15, 25, 50],
            max_custom_minutes: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether single-track loop starts enabled.
    pub loop_track: bool,
    /// Initial audio volume, 0.0 to 1.0.
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            loop_track: false,
            volume: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory when set.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ andante: steady work, steady sound ~ ".to_string(),
        }
    }
}
