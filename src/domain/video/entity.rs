use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog-backed video: uploaded content with durable identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display title
    pub title: String,

    /// Path of the managed media file
    pub file_path: PathBuf,

    /// Uploading account; None for system-seeded content
    pub uploader_id: Option<Uuid>,

    /// Aggregate like count, never negative
    pub likes: u64,

    /// Browse category
    pub category: String,

    /// Free-form tag list
    pub tags: Vec<String>,

    /// Known duration in seconds (0 when not probed yet)
    pub duration_seconds: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

pub const DEFAULT_CATEGORY: &str = "General";

impl Video {
    /// Create a new Video entity
    /// This is the only way to construct a valid Video
    pub fn new(title: String, file_path: PathBuf, uploader_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            file_path,
            uploader_id,
            likes: 0,
            category: DEFAULT_CATEGORY.to_string(),
            tags: Vec::new(),
            duration_seconds: 0,
            created_at: Utc::now(),
        }
    }

    /// Blank category collapses to the default, mirroring ingest behavior
    pub fn with_category(mut self, category: Option<String>) -> Self {
        if let Some(c) = category {
            let trimmed = c.trim();
            if !trimmed.is_empty() {
                self.category = trimmed.to_string();
            }
        }
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_duration(mut self, duration_seconds: u64) -> Self {
        self.duration_seconds = duration_seconds;
        self
    }
}

/// Content known only by display title for the life of the process,
/// with no row in the catalog (shorts, demo clips).
///
/// The synthetic id gives ephemeral content a stable identity for
/// session-scoped like counting; titles are display data, not keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemeralVideo {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    /// Remote or local source the transport can play
    pub source: String,
}

impl EphemeralVideo {
    pub fn new(title: &str, category: &str, source: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category: category.to_string(),
            source: source.to_string(),
        }
    }
}

/// Identity of likeable/playable content, polymorphic over persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentRef {
    /// Durable identity in the catalog store
    Catalog { video_id: Uuid },
    /// Synthetic process-lifetime identity
    Ephemeral { content_id: Uuid },
}

impl ContentRef {
    pub fn catalog(video_id: Uuid) -> Self {
        Self::Catalog { video_id }
    }

    pub fn ephemeral(content_id: Uuid) -> Self {
        Self::Ephemeral { content_id }
    }
}
