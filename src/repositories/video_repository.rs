// src/repositories/video_repository.rs
//
// Catalog persistence

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Video;
use crate::error::{AppError, AppResult};

pub trait VideoRepository: Send + Sync {
    fn insert(&self, video: &Video) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Video>>;
    /// Filtered listing: case-insensitive title substring AND exact
    /// category, both optional. Order is stable for a fixed store state.
    fn list(&self, search_text: Option<&str>, category: Option<&str>) -> AppResult<Vec<Video>>;
    /// Single-statement atomic increment; None when the id is unknown.
    /// Returns the post-increment count.
    fn increment_likes(&self, id: Uuid) -> AppResult<Option<u64>>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
}

pub struct SqliteVideoRepository {
    pool: Arc<ConnectionPool>,
}

const VIDEO_COLUMNS: &str =
    "id, title, file_path, uploader_id, likes, category, tags, duration_seconds, created_at";

impl SqliteVideoRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Video - returns rusqlite::Error for query_map compatibility
    fn row_to_video(row: &Row) -> Result<Video, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let uploader_str: Option<String> = row.get("uploader_id")?;
        let uploader_id = uploader_str
            .map(|s| {
                Uuid::parse_str(&s)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let file_path: String = row.get("file_path")?;

        let likes: i64 = row.get("likes")?;

        let tags_json: String = row.get("tags")?;
        let tags: Vec<String> = serde_json::from_str(&tags_json)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let duration: i64 = row.get("duration_seconds")?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Video {
            id,
            title: row.get("title")?,
            file_path: PathBuf::from(file_path),
            uploader_id,
            likes: likes.max(0) as u64,
            category: row.get("category")?,
            tags,
            duration_seconds: duration.max(0) as u64,
            created_at,
        })
    }
}

impl VideoRepository for SqliteVideoRepository {
    fn insert(&self, video: &Video) -> AppResult<()> {
        let conn = self.pool.get()?;

        let tags_json = serde_json::to_string(&video.tags)?;

        conn.execute(
            "INSERT INTO videos (
                id, title, file_path, uploader_id, likes, category, tags,
                duration_seconds, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                video.id.to_string(),
                video.title,
                video.file_path.to_string_lossy(),
                video.uploader_id.map(|u| u.to_string()),
                video.likes as i64,
                video.category,
                tags_json,
                video.duration_seconds as i64,
                video.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Video>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM videos WHERE id = ?1",
            VIDEO_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_video) {
            Ok(video) => Ok(Some(video)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list(&self, search_text: Option<&str>, category: Option<&str>) -> AppResult<Vec<Video>> {
        let conn = self.pool.get()?;

        // Filters are ANDed; both absent lists the whole catalog.
        let mut sql = format!("SELECT {} FROM videos WHERE 1=1", VIDEO_COLUMNS);
        let mut bound: Vec<String> = Vec::new();

        if let Some(text) = search_text {
            if !text.is_empty() {
                sql.push_str(" AND instr(lower(title), lower(?)) > 0");
                bound.push(text.to_string());
            }
        }

        if let Some(cat) = category {
            sql.push_str(" AND category = ?");
            bound.push(cat.to_string());
        }

        // Insertion order keeps results stable for a fixed store state
        sql.push_str(" ORDER BY created_at, id");

        let mut stmt = conn.prepare(&sql)?;
        let videos: Vec<Video> = stmt
            .query_map(params_from_iter(bound.iter()), Self::row_to_video)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(videos)
    }

    fn increment_likes(&self, id: Uuid) -> AppResult<Option<u64>> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE videos SET likes = likes + 1 WHERE id = ?1",
            params![id.to_string()],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }

        let likes: i64 = conn.query_row(
            "SELECT likes FROM videos WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(Some(likes.max(0) as u64))
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM videos WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
