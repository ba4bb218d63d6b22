//! Selection state and the end-of-track advancement policy.

mod state;

pub use state::*;
