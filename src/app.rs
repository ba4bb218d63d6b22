//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the library, playlists,
//! work log, timer and selection state, plus the persistence glue.

mod model;

pub use model::*;
