// src/services/watch_service.rs
//
// Watch-State Service - progress, history, downloads
//
// Progress writes are full replacements on the (user, video) key:
// last writer wins and exactly one row exists per pair.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Download, DownloadEntry, HistoryEntry, WatchProgress};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, VideoDownloaded};
use crate::infrastructure::MediaStorage;
use crate::repositories::{DownloadRepository, VideoRepository, WatchHistoryRepository};

pub struct WatchService {
    watch_repo: Arc<dyn WatchHistoryRepository>,
    download_repo: Arc<dyn DownloadRepository>,
    video_repo: Arc<dyn VideoRepository>,
    storage: Arc<MediaStorage>,
    event_bus: Arc<EventBus>,
}

impl WatchService {
    pub fn new(
        watch_repo: Arc<dyn WatchHistoryRepository>,
        download_repo: Arc<dyn DownloadRepository>,
        video_repo: Arc<dyn VideoRepository>,
        storage: Arc<MediaStorage>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            watch_repo,
            download_repo,
            video_repo,
            storage,
            event_bus,
        }
    }

    /// Replace the pair's progress record. The percentage is clamped to
    /// [0, 100]; `observed_at` defaults to now.
    pub fn upsert_progress(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        progress_percent: f64,
        observed_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let progress = WatchProgress::observed(
            user_id,
            video_id,
            progress_percent,
            observed_at.unwrap_or_else(Utc::now),
        );

        self.watch_repo.upsert(&progress)
    }

    pub fn progress(&self, user_id: Uuid, video_id: Uuid) -> AppResult<Option<f64>> {
        Ok(self
            .watch_repo
            .get(user_id, video_id)?
            .map(|p| p.progress_percent))
    }

    pub fn resume_point(&self, user_id: Uuid, video_id: Uuid) -> AppResult<Option<WatchProgress>> {
        self.watch_repo.get(user_id, video_id)
    }

    /// Most recently watched first
    pub fn history(&self, user_id: Uuid) -> AppResult<Vec<HistoryEntry>> {
        self.watch_repo.list_for_user(user_id)
    }

    /// Copy a catalog video into the downloads directory and record it.
    ///
    /// Unknown id is NotFound. A missing backing file is MissingFile and
    /// leaves the downloads relation untouched. Re-downloading overwrites
    /// both the copy and the row.
    pub fn record_download(&self, user_id: Uuid, video_id: Uuid) -> AppResult<PathBuf> {
        let video = self
            .video_repo
            .get_by_id(video_id)?
            .ok_or(AppError::NotFound)?;

        // Copy first: if the file is gone no row may be written
        let local_path = self.storage.copy_to_downloads(&video.file_path, video_id)?;

        let download = Download {
            user_id,
            video_id,
            local_path: local_path.clone(),
            downloaded_at: Utc::now(),
        };
        self.download_repo.upsert(&download)?;

        log::info!("downloaded: {} -> {:?}", video.title, local_path);
        self.event_bus
            .emit(VideoDownloaded::new(user_id, video_id, local_path.clone()));

        Ok(local_path)
    }

    pub fn downloads(&self, user_id: Uuid) -> AppResult<Vec<DownloadEntry>> {
        self.download_repo.list_for_user(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    use chrono::Duration;

    use crate::db::{create_test_pool, get_connection, initialize_database, ConnectionPool};
    use crate::events::create_event_bus;
    use crate::repositories::{
        SqliteDownloadRepository, SqliteUserRepository, SqliteVideoRepository,
        SqliteWatchHistoryRepository, UserRepository, VideoRepository,
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        pool: Arc<ConnectionPool>,
        storage: Arc<MediaStorage>,
        service: WatchService,
        user_id: Uuid,
        video_id: Uuid,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_test_pool().unwrap());
        {
            let conn = get_connection(&pool).unwrap();
            initialize_database(&conn).unwrap();
        }

        let storage = Arc::new(
            MediaStorage::new(dir.path().join("media"), dir.path().join("downloads")).unwrap(),
        );

        let user_repo = SqliteUserRepository::new(Arc::clone(&pool));
        let video_repo = SqliteVideoRepository::new(Arc::clone(&pool));

        let user = crate::domain::User::new("mika".to_string(), "hunter2".to_string());
        user_repo.insert(&user).unwrap();

        let media_file = dir.path().join("media").join("seed.mp4");
        let mut f = fs::File::create(&media_file).unwrap();
        f.write_all(b"bytes").unwrap();

        let video = crate::domain::Video::new(
            "City Timelapse".to_string(),
            media_file,
            Some(user.id),
        )
        .with_duration(300);
        video_repo.insert(&video).unwrap();

        let service = WatchService::new(
            Arc::new(SqliteWatchHistoryRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteDownloadRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteVideoRepository::new(Arc::clone(&pool))),
            Arc::clone(&storage),
            create_event_bus(),
        );

        Fixture {
            _dir: dir,
            pool,
            storage,
            service,
            user_id: user.id,
            video_id: video.id,
        }
    }

    fn add_video(fx: &Fixture, title: &str, file: &str) -> Uuid {
        let video_repo = SqliteVideoRepository::new(Arc::clone(&fx.pool));
        let path = fx.storage.media_dir().join(file);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(b"bytes").unwrap();
        let video =
            crate::domain::Video::new(title.to_string(), path, None).with_duration(120);
        video_repo.insert(&video).unwrap();
        video.id
    }

    fn pair_row_count(fx: &Fixture) -> i64 {
        let conn = get_connection(&fx.pool).unwrap();
        conn.query_row(
            "SELECT COUNT(*) FROM watch_history WHERE user_id = ?1 AND video_id = ?2",
            rusqlite::params![fx.user_id.to_string(), fx.video_id.to_string()],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_upsert_keeps_exactly_one_row_with_last_value() {
        let fx = fixture();

        for percent in [10.0, 55.0, 42.5, 150.0, 87.0] {
            fx.service
                .upsert_progress(fx.user_id, fx.video_id, percent, None)
                .unwrap();
        }

        assert_eq!(pair_row_count(&fx), 1);
        let progress = fx.service.progress(fx.user_id, fx.video_id).unwrap();
        assert_eq!(progress, Some(87.0));
    }

    #[test]
    fn test_out_of_range_percent_is_clamped() {
        let fx = fixture();

        fx.service
            .upsert_progress(fx.user_id, fx.video_id, 150.0, None)
            .unwrap();
        assert_eq!(fx.service.progress(fx.user_id, fx.video_id).unwrap(), Some(100.0));

        fx.service
            .upsert_progress(fx.user_id, fx.video_id, -10.0, None)
            .unwrap();
        assert_eq!(fx.service.progress(fx.user_id, fx.video_id).unwrap(), Some(0.0));
    }

    #[test]
    fn test_unwatched_video_has_no_progress() {
        let fx = fixture();
        assert_eq!(fx.service.progress(fx.user_id, fx.video_id).unwrap(), None);
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let fx = fixture();
        let older = add_video(&fx, "Older Watch", "older.mp4");

        let base = Utc::now();
        fx.service
            .upsert_progress(fx.user_id, older, 80.0, Some(base - Duration::hours(2)))
            .unwrap();
        fx.service
            .upsert_progress(fx.user_id, fx.video_id, 20.0, Some(base))
            .unwrap();

        let history = fx.service.history(fx.user_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].title, "City Timelapse");
        assert_eq!(history[0].duration_seconds, 300);
        assert_eq!(history[1].title, "Older Watch");
    }

    #[test]
    fn test_record_download_copies_and_records() {
        let fx = fixture();

        let path = fx.service.record_download(fx.user_id, fx.video_id).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(fx.storage.downloads_dir()));

        let downloads = fx.service.downloads(fx.user_id).unwrap();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0].title, "City Timelapse");
        assert_eq!(downloads[0].local_path, path);
    }

    #[test]
    fn test_redownload_overwrites_the_single_row() {
        let fx = fixture();

        fx.service.record_download(fx.user_id, fx.video_id).unwrap();
        fx.service.record_download(fx.user_id, fx.video_id).unwrap();

        assert_eq!(fx.service.downloads(fx.user_id).unwrap().len(), 1);
    }

    #[test]
    fn test_download_missing_backing_file_writes_no_row() {
        let fx = fixture();

        // Remove the backing file out from under the catalog row
        let video_repo = SqliteVideoRepository::new(Arc::clone(&fx.pool));
        let video = video_repo.get_by_id(fx.video_id).unwrap().unwrap();
        fs::remove_file(&video.file_path).unwrap();

        let result = fx.service.record_download(fx.user_id, fx.video_id);
        assert!(matches!(result, Err(AppError::MissingFile(_))));

        assert!(fx.service.downloads(fx.user_id).unwrap().is_empty());
    }

    #[test]
    fn test_download_unknown_video_is_not_found() {
        let fx = fixture();
        let result = fx.service.record_download(fx.user_id, Uuid::new_v4());
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
