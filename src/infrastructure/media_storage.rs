// src/infrastructure/media_storage.rs
//
// Managed Media Storage
//
// CRITICAL RULES:
// - Source files are NEVER modified, only copied
// - Library files are named by catalog id, downloads by id + basename
// - Removal is explicit; nothing is deleted as a side effect of reads

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Owns the managed `media/` and `downloads/` directories.
///
/// INVARIANTS:
/// - A library file exists for every committed catalog row (the upload
///   flow copies before inserting and removes the copy on insert failure)
/// - Download copies never collide across videos: the name embeds the id
#[derive(Debug, Clone)]
pub struct MediaStorage {
    media_dir: PathBuf,
    downloads_dir: PathBuf,
}

impl MediaStorage {
    /// Create storage rooted at the given directories, creating them if
    /// needed.
    pub fn new(media_dir: PathBuf, downloads_dir: PathBuf) -> AppResult<Self> {
        fs::create_dir_all(&media_dir).map_err(AppError::Io)?;
        fs::create_dir_all(&downloads_dir).map_err(AppError::Io)?;

        Ok(Self {
            media_dir,
            downloads_dir,
        })
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    /// Copy an upload into the library as `{video_id}.{ext}`.
    ///
    /// Fails with MissingFile when the source is gone; the caller inserts
    /// the catalog row only after this returns.
    pub fn ingest_upload(&self, source: &Path, video_id: Uuid) -> AppResult<PathBuf> {
        if !source.exists() {
            return Err(AppError::MissingFile(source.to_path_buf()));
        }

        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "mp4".to_string());
        let dest = self.media_dir.join(format!("{}.{}", video_id, ext));

        fs::copy(source, &dest).map_err(AppError::Io)?;

        Ok(dest)
    }

    /// Copy a library file into the downloads directory as
    /// `{video_id}_{basename}`. Re-downloading overwrites the copy.
    pub fn copy_to_downloads(&self, library_file: &Path, video_id: Uuid) -> AppResult<PathBuf> {
        if !library_file.exists() {
            return Err(AppError::MissingFile(library_file.to_path_buf()));
        }

        let basename = library_file
            .file_name()
            .ok_or_else(|| AppError::Other(format!("Invalid filename: {:?}", library_file)))?;
        let dest = self
            .downloads_dir
            .join(format!("{}_{}", video_id, basename.to_string_lossy()));

        fs::copy(library_file, &dest).map_err(AppError::Io)?;

        Ok(dest)
    }

    /// Remove a managed file, tolerating one that is already gone.
    /// Used to roll back a half-finished ingest.
    pub fn remove(&self, path: &Path) -> AppResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
