use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One comment on a catalog video. Comments are append-only facts; there
/// is no edit or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// The text is stored trimmed; emptiness is checked by the validator.
    pub fn new(video_id: Uuid, user_id: Uuid, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            video_id,
            user_id,
            text: text.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Display projection of a comment: author name joined in, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub username: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}
