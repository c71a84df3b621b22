// src/services/comment_service.rs
//
// Comment Service - append-only per-video discussion

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{validate_comment_text, Comment, CommentView};
use crate::error::{AppError, AppResult};
use crate::events::{CommentPosted, EventBus};
use crate::repositories::{CommentRepository, VideoRepository};

pub struct CommentService {
    comment_repo: Arc<dyn CommentRepository>,
    video_repo: Arc<dyn VideoRepository>,
    event_bus: Arc<EventBus>,
}

impl CommentService {
    pub fn new(
        comment_repo: Arc<dyn CommentRepository>,
        video_repo: Arc<dyn VideoRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            comment_repo,
            video_repo,
            event_bus,
        }
    }

    /// Append a comment. Whitespace-only text is a validation error and
    /// writes nothing.
    pub fn add_comment(&self, video_id: Uuid, user_id: Uuid, text: &str) -> AppResult<Uuid> {
        validate_comment_text(text)?;

        if !self.video_repo.exists(video_id)? {
            return Err(AppError::NotFound);
        }

        let comment = Comment::new(video_id, user_id, text);
        self.comment_repo.insert(&comment)?;

        self.event_bus
            .emit(CommentPosted::new(comment.id, video_id, user_id));

        Ok(comment.id)
    }

    /// Newest first, with the author's username joined in
    pub fn comments(&self, video_id: Uuid) -> AppResult<Vec<CommentView>> {
        self.comment_repo.list_for_video(video_id)
    }
}
