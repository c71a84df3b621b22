use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single progress record for a (user, video) pair.
///
/// Writes are full replacements: there is exactly one row per pair and it
/// always reflects the most recent observation. No history is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchProgress {
    pub user_id: Uuid,
    pub video_id: Uuid,
    /// Percentage in [0, 100]
    pub progress_percent: f64,
    pub last_watched: DateTime<Utc>,
}

impl WatchProgress {
    /// Construct with the percentage clamped into [0, 100].
    /// Out-of-range observations are a transport artifact, not an error.
    pub fn observed(
        user_id: Uuid,
        video_id: Uuid,
        progress_percent: f64,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            video_id,
            progress_percent: progress_percent.clamp(0.0, 100.0),
            last_watched: observed_at,
        }
    }

    /// Stored percentage divided by 100, used to seek the transport
    pub fn resume_fraction(&self) -> f64 {
        self.progress_percent / 100.0
    }
}

/// One row of a user's watch history, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub video_id: Uuid,
    pub title: String,
    pub progress_percent: f64,
    pub duration_seconds: u64,
    pub last_watched: DateTime<Utc>,
}

/// The single download record for a (user, video) pair; re-downloading
/// overwrites the row and the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Download {
    pub user_id: Uuid,
    pub video_id: Uuid,
    pub local_path: PathBuf,
    pub downloaded_at: DateTime<Utc>,
}

/// Display projection of a download joined with its video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadEntry {
    pub video_id: Uuid,
    pub title: String,
    pub local_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        let user = Uuid::new_v4();
        let video = Uuid::new_v4();
        let over = WatchProgress::observed(user, video, 140.0, Utc::now());
        assert_eq!(over.progress_percent, 100.0);

        let under = WatchProgress::observed(user, video, -3.0, Utc::now());
        assert_eq!(under.progress_percent, 0.0);
    }

    #[test]
    fn test_resume_fraction() {
        let p = WatchProgress::observed(Uuid::new_v4(), Uuid::new_v4(), 40.0, Utc::now());
        assert!((p.resume_fraction() - 0.40).abs() < f64::EPSILON);
    }
}
