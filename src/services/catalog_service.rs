// src/services/catalog_service.rs
//
// Catalog Service - upload ingest, listing, like counting
//
// The upload flow copies the media file BEFORE inserting the row and
// removes the copy if the insert fails, so the catalog never points at a
// file that does not exist and no orphan file outlives a failed insert.

use std::path::PathBuf;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{validate_video, Video};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, VideoLiked, VideoUploaded};
use crate::infrastructure::MediaStorage;
use crate::repositories::{UserRepository, VideoRepository};

#[derive(Debug, Clone)]
pub struct UploadVideoRequest {
    pub title: String,
    /// File picked by the (external) selection dialog
    pub source_path: PathBuf,
    /// None for system-seeded content
    pub uploader_id: Option<Uuid>,
    /// Blank or absent collapses to "General"
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub duration_seconds: u64,
}

pub struct CatalogService {
    video_repo: Arc<dyn VideoRepository>,
    user_repo: Arc<dyn UserRepository>,
    storage: Arc<MediaStorage>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(
        video_repo: Arc<dyn VideoRepository>,
        user_repo: Arc<dyn UserRepository>,
        storage: Arc<MediaStorage>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            video_repo,
            user_repo,
            storage,
            event_bus,
        }
    }

    /// Ingest an upload into the catalog.
    ///
    /// Order matters: validate, copy into the library, insert the row.
    /// An insert failure removes the copied file again, leaving no
    /// half-applied state on either side.
    pub fn upload_video(&self, request: UploadVideoRequest) -> AppResult<Uuid> {
        let mut video = Video::new(
            request.title.trim().to_string(),
            request.source_path.clone(),
            request.uploader_id,
        )
        .with_category(request.category)
        .with_tags(request.tags)
        .with_duration(request.duration_seconds);

        validate_video(&video)?;

        if let Some(uploader) = request.uploader_id {
            if !self.user_repo.exists(uploader)? {
                return Err(AppError::NotFound);
            }
        }

        let library_path = self.storage.ingest_upload(&request.source_path, video.id)?;
        video.file_path = library_path.clone();

        if let Err(e) = self.video_repo.insert(&video) {
            // Roll the copy back; the original error is what the caller sees
            if let Err(cleanup) = self.storage.remove(&library_path) {
                log::warn!("failed to remove {:?} after insert error: {}", library_path, cleanup);
            }
            return Err(e);
        }

        log::info!("video ingested: {} ({})", video.title, video.id);
        self.event_bus.emit(VideoUploaded::new(
            video.id,
            video.title.clone(),
            video.category.clone(),
        ));

        Ok(video.id)
    }

    /// Atomic like increment for catalog content; returns the new count.
    ///
    /// Repeated likes by the same user all count (no per-user dedup).
    pub fn increment_like(&self, video_id: Uuid) -> AppResult<u64> {
        let count = self
            .video_repo
            .increment_likes(video_id)?
            .ok_or(AppError::NotFound)?;

        self.event_bus.emit(VideoLiked::new(video_id, count));

        Ok(count)
    }

    /// Filtered catalog listing; both filters optional and ANDed
    pub fn list_videos(
        &self,
        search_text: Option<&str>,
        category: Option<&str>,
    ) -> AppResult<Vec<Video>> {
        self.video_repo.list(search_text, category)
    }

    pub fn get_video(&self, video_id: Uuid) -> AppResult<Option<Video>> {
        self.video_repo.get_by_id(video_id)
    }

    /// Playable path for a catalog video. Unknown id is NotFound; a row
    /// whose backing file is gone is MissingFile, signaled distinctly.
    pub fn video_path(&self, video_id: Uuid) -> AppResult<PathBuf> {
        let video = self
            .video_repo
            .get_by_id(video_id)?
            .ok_or(AppError::NotFound)?;

        if !video.file_path.exists() {
            return Err(AppError::MissingFile(video.file_path));
        }

        Ok(video.file_path)
    }
}
