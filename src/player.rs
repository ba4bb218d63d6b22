//! Playback backends and the engine that routes between them.
//!
//! Imported audio plays on a dedicated `rodio` thread; linked videos are
//! handed to an external embed frame. Exactly one backend is active at a
//! time.

mod embed;
mod engine;
mod player;
mod sink;
mod thread;
mod types;

pub use embed::*;
pub use engine::*;
pub use player::*;
pub use types::*;

#[cfg(test)]
mod tests;
