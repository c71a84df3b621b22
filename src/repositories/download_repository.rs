// src/repositories/download_repository.rs
//
// Download-record persistence; same upsert shape as watch history.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Download, DownloadEntry};
use crate::error::{AppError, AppResult};

pub trait DownloadRepository: Send + Sync {
    /// Full replace of the pair's row; a re-download overwrites
    fn upsert(&self, download: &Download) -> AppResult<()>;
    fn get(&self, user_id: Uuid, video_id: Uuid) -> AppResult<Option<Download>>;
    /// Joined with videos for display
    fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<DownloadEntry>>;
}

pub struct SqliteDownloadRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteDownloadRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_download(row: &Row) -> Result<Download, rusqlite::Error> {
        let user_str: String = row.get("user_id")?;
        let user_id = Uuid::parse_str(&user_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let video_str: String = row.get("video_id")?;
        let video_id = Uuid::parse_str(&video_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let path: String = row.get("local_path")?;

        let downloaded_at_str: String = row.get("downloaded_at")?;
        let downloaded_at = DateTime::parse_from_rfc3339(&downloaded_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Download {
            user_id,
            video_id,
            local_path: PathBuf::from(path),
            downloaded_at,
        })
    }
}

impl DownloadRepository for SqliteDownloadRepository {
    fn upsert(&self, download: &Download) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO downloads (user_id, video_id, local_path, downloaded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                download.user_id.to_string(),
                download.video_id.to_string(),
                download.local_path.to_string_lossy(),
                download.downloaded_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn get(&self, user_id: Uuid, video_id: Uuid) -> AppResult<Option<Download>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT user_id, video_id, local_path, downloaded_at
             FROM downloads WHERE user_id = ?1 AND video_id = ?2",
        )?;

        match stmt.query_row(
            params![user_id.to_string(), video_id.to_string()],
            Self::row_to_download,
        ) {
            Ok(download) => Ok(Some(download)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<DownloadEntry>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT v.id, v.title, d.local_path
             FROM downloads d
             JOIN videos v ON d.video_id = v.id
             WHERE d.user_id = ?1
             ORDER BY d.downloaded_at DESC",
        )?;

        let entries: Vec<DownloadEntry> = stmt
            .query_map(params![user_id.to_string()], |row| {
                let video_str: String = row.get(0)?;
                let video_id = Uuid::parse_str(&video_str)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

                let path: String = row.get(2)?;

                Ok(DownloadEntry {
                    video_id,
                    title: row.get(1)?,
                    local_path: PathBuf::from(path),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
