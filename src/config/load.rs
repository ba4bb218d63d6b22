use std::env;
use std::path::PathBuf;

use super::schema::Settings;

impl Settings {
    /// Read settings from the config file (if one exists) with `ANDANTE__`
    /// environment overrides layered on top, falling back to the struct
    /// defaults for anything unset.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = config_path() {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        builder
            .add_source(
                ::config::Environment::with_prefix("ANDANTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Sanity checks that deserialization cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.timer.default_minutes == 0 {
            return Err("timer.default_minutes must be >= 1".to_string());
        }
        if self.timer.max_custom_minutes == 0 {
            return Err("timer.max_custom_minutes must be >= 1".to_string());
        }
        if self.timer.presets.is_empty() {
            return Err("timer.presets must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err("playback.volume must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

/// The config file path: `ANDANTE_CONFIG_PATH` wins over the XDG default.
pub fn config_path() -> Option<PathBuf> {
    env::var_os("ANDANTE_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/andante/config.toml`, or the `~/.config` equivalent
/// when `XDG_CONFIG_HOME` is unset.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|base| base.join("andante").join("config.toml"))
}
