pub mod entity;
pub mod invariants;

pub use entity::{Comment, CommentView};
pub use invariants::validate_comment_text;
