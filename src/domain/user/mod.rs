pub mod entity;
pub mod invariants;

pub use entity::User;
pub use invariants::{validate_new_user, validate_profile};
