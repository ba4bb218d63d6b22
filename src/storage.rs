//! JSON persistence for the library, playlists, and work log.

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
