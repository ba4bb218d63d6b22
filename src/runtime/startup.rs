use crate::app::App;
use crate::player::{AudioControl, PlaybackEngine};

/// Push the configured playback defaults into the audio thread before the
/// first track starts.
pub fn apply_playback_defaults<A: AudioControl>(engine: &mut PlaybackEngine<A>, app: &App) {
    engine.set_volume(app.controller.volume);
}
