//! Focus sessions: the countdown timer and the work log.

mod log;
mod timer;

pub use self::log::*;
pub use self::timer::*;
