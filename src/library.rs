//! Track library: uploaded audio tracks and linked video tracks unified
//! into one addressable collection with stable identity.

mod model;
mod store;
mod video;

pub use model::*;
pub use store::*;
pub use video::{embed_url, extract_video_id};

#[cfg(test)]
pub(crate) mod tests;
