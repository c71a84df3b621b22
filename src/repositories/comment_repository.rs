// src/repositories/comment_repository.rs
//
// Comment persistence. Append-only: there is no update or delete SQL here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::params;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Comment, CommentView};
use crate::error::AppResult;

pub trait CommentRepository: Send + Sync {
    fn insert(&self, comment: &Comment) -> AppResult<()>;
    /// Display projection joined with the author, newest first
    fn list_for_video(&self, video_id: Uuid) -> AppResult<Vec<CommentView>>;
    fn count_for_video(&self, video_id: Uuid) -> AppResult<u64>;
}

pub struct SqliteCommentRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCommentRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl CommentRepository for SqliteCommentRepository {
    fn insert(&self, comment: &Comment) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO comments (id, video_id, user_id, text, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                comment.id.to_string(),
                comment.video_id.to_string(),
                comment.user_id.to_string(),
                comment.text,
                comment.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn list_for_video(&self, video_id: Uuid) -> AppResult<Vec<CommentView>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT u.username, c.text, c.created_at
             FROM comments c
             JOIN users u ON c.user_id = u.id
             WHERE c.video_id = ?1
             ORDER BY c.created_at DESC",
        )?;

        let views: Vec<CommentView> = stmt
            .query_map(params![video_id.to_string()], |row| {
                let posted_at_str: String = row.get(2)?;
                let posted_at = DateTime::parse_from_rfc3339(&posted_at_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

                Ok(CommentView {
                    username: row.get(0)?,
                    text: row.get(1)?,
                    posted_at,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(views)
    }

    fn count_for_video(&self, video_id: Uuid) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE video_id = ?1",
            params![video_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count.max(0) as u64)
    }
}
