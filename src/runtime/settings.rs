use crate::config::Settings;

/// Load settings, degrading to the defaults when the config is broken.
/// Runs before the alternate screen, so complaints go straight to stderr.
pub fn load_settings() -> Settings {
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(err) => {
            eprintln!("andante: could not load config, using defaults: {err}");
            return Settings::default();
        }
    };
    if let Err(msg) = settings.validate() {
        eprintln!("andante: invalid config, using defaults: {msg}");
        return Settings::default();
    }
    settings
}
