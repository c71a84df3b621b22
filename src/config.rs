// src/config.rs
//
// Application configuration
//
// PRINCIPLES:
// - Plain data, no hidden lookups at use sites
// - Defaults resolve against the platform data directory
// - Policy knobs (seed subscriptions) live here, not in services

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::db::connection::default_database_path;
use crate::error::AppResult;

/// Configuration for one application instance.
///
/// Everything is overridable; `AppConfig::default_locations()` resolves
/// the standard per-user layout under the platform data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Managed library directory for ingested uploads
    pub media_dir: PathBuf,

    /// Directory download copies land in
    pub downloads_dir: PathBuf,

    /// Channels every fresh account (or empty subscription list) is
    /// seeded with
    pub default_subscriptions: Vec<String>,
}

impl AppConfig {
    /// Standard per-user layout: {APP_DATA}/streamhub/{streamhub.db,media,downloads}
    pub fn default_locations() -> AppResult<Self> {
        let database_path = default_database_path()?;
        let base = database_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            media_dir: base.join("media"),
            downloads_dir: base.join("downloads"),
            database_path,
            default_subscriptions: vec!["TechReviews".to_string()],
        })
    }

    /// Layout rooted at an arbitrary directory (tests, portable installs)
    pub fn rooted_at(base: &std::path::Path) -> Self {
        Self {
            database_path: base.join("streamhub.db"),
            media_dir: base.join("media"),
            downloads_dir: base.join("downloads"),
            default_subscriptions: vec!["TechReviews".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_layout() {
        let config = AppConfig::rooted_at(std::path::Path::new("/tmp/sh"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/sh/streamhub.db"));
        assert_eq!(config.media_dir, PathBuf::from("/tmp/sh/media"));
        assert_eq!(config.default_subscriptions, vec!["TechReviews"]);
    }
}
