pub mod entity;
pub mod invariants;

pub use entity::{ContentRef, EphemeralVideo, Video};
pub use invariants::validate_video;
