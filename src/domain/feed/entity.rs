use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the transport finds the bytes for a feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaSource {
    /// Managed file on local disk (catalog-backed)
    Local { path: PathBuf },
    /// Stock/remote URL (roster and ephemeral content)
    Remote { url: String },
}

/// What produced a feed entry; determines identity and playability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEntryKind {
    /// Catalog row with durable identity
    Catalog { video_id: Uuid },
    /// Static channel roster title; no durable identity
    Roster,
    /// The sponsored slot; not playable
    Sponsored,
}

/// One renderable item of the assembled content list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub kind: FeedEntryKind,
    pub title: String,
    /// None only for the sponsored slot
    pub source: Option<MediaSource>,
    /// Channel attribution; empty for the sponsored slot
    pub channel: String,
    pub category: String,
    pub likes: u64,
    /// True when the entry's channel is in the viewer's subscriptions
    pub subscribed: bool,
}

impl FeedEntry {
    pub fn is_playable(&self) -> bool {
        self.source.is_some()
    }
}

/// Inputs of one feed assembly
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Case-insensitive substring match against catalog titles
    pub search_text: Option<String>,
    /// Exact category match for catalog rows
    pub category: Option<String>,
    /// Whether to append the sponsored slot
    pub ads_enabled: bool,
}

impl FeedQuery {
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn search(text: &str) -> Self {
        Self {
            search_text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn category(name: &str) -> Self {
        Self {
            category: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_ads(mut self) -> Self {
        self.ads_enabled = true;
        self
    }
}
