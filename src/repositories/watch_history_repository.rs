// src/repositories/watch_history_repository.rs
//
// Watch-progress persistence. The composite primary key plus
// INSERT OR REPLACE guarantee at most one row per (user, video) pair.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{HistoryEntry, WatchProgress};
use crate::error::{AppError, AppResult};

pub trait WatchHistoryRepository: Send + Sync {
    /// Full replace of the pair's row; last writer wins
    fn upsert(&self, progress: &WatchProgress) -> AppResult<()>;
    fn get(&self, user_id: Uuid, video_id: Uuid) -> AppResult<Option<WatchProgress>>;
    /// Joined with videos, most recently watched first
    fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<HistoryEntry>>;
}

pub struct SqliteWatchHistoryRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteWatchHistoryRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_progress(row: &Row) -> Result<WatchProgress, rusqlite::Error> {
        let user_str: String = row.get("user_id")?;
        let user_id = Uuid::parse_str(&user_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let video_str: String = row.get("video_id")?;
        let video_id = Uuid::parse_str(&video_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let last_watched_str: String = row.get("last_watched")?;
        let last_watched = DateTime::parse_from_rfc3339(&last_watched_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(WatchProgress {
            user_id,
            video_id,
            progress_percent: row.get("progress")?,
            last_watched,
        })
    }
}

impl WatchHistoryRepository for SqliteWatchHistoryRepository {
    fn upsert(&self, progress: &WatchProgress) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO watch_history (user_id, video_id, progress, last_watched)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                progress.user_id.to_string(),
                progress.video_id.to_string(),
                progress.progress_percent,
                progress.last_watched.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get(&self, user_id: Uuid, video_id: Uuid) -> AppResult<Option<WatchProgress>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, video_id, progress, last_watched
             FROM watch_history WHERE user_id = ?1 AND video_id = ?2",
        )?;

        match stmt.query_row(
            params![user_id.to_string(), video_id.to_string()],
            Self::row_to_progress,
        ) {
            Ok(progress) => Ok(Some(progress)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<HistoryEntry>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT v.id, v.title, wh.progress, v.duration_seconds, wh.last_watched
             FROM watch_history wh
             JOIN videos v ON wh.video_id = v.id
             WHERE wh.user_id = ?1
             ORDER BY wh.last_watched DESC",
        )?;

        let entries: Vec<HistoryEntry> = stmt
            .query_map(params![user_id.to_string()], |row| {
                let video_str: String = row.get(0)?;
                let video_id = Uuid::parse_str(&video_str)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

                let duration: i64 = row.get(3)?;

                let last_watched_str: String = row.get(4)?;
                let last_watched = DateTime::parse_from_rfc3339(&last_watched_str)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

                Ok(HistoryEntry {
                    video_id,
                    title: row.get(1)?,
                    progress_percent: row.get(2)?,
                    duration_seconds: duration.max(0) as u64,
                    last_watched,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
