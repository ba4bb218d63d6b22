//! Named, ordered track-id lists with a lifecycle independent from the
//! library. Deleting a track never edits playlists; unresolvable ids are
//! dropped at queue-resolution time instead.

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
