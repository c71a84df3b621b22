// src/services/feed_service.rs
//
// Feed Assembler
//
// Deterministic merge of three sources into one ordered list:
// catalog rows, static channel rosters, the sponsored slot.
// Assembly never fails; no matches yields an empty (or ad-only) list.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{
    ChannelDirectory, FeedEntry, FeedEntryKind, FeedQuery, MediaSource, USER_UPLOADS_CHANNEL,
};
use crate::error::AppResult;
use crate::repositories::VideoRepository;

pub struct FeedService {
    video_repo: Arc<dyn VideoRepository>,
    channels: Arc<ChannelDirectory>,
}

impl FeedService {
    pub fn new(video_repo: Arc<dyn VideoRepository>, channels: Arc<ChannelDirectory>) -> Self {
        Self {
            video_repo,
            channels,
        }
    }

    /// Assemble the feed for one viewer.
    ///
    /// Order is the concatenation order and is part of the contract:
    /// catalog rows first, then each static channel's roster in directory
    /// order, then the sponsored slot. No re-sorting afterwards.
    ///
    /// Search and category filters apply to catalog rows only; roster
    /// titles always appear regardless of the filters.
    pub fn assemble(
        &self,
        query: &FeedQuery,
        subscriptions: &BTreeSet<String>,
    ) -> AppResult<Vec<FeedEntry>> {
        let mut entries = Vec::new();

        // 1. Catalog rows, attributed to the synthetic UserUploads channel
        let videos = self
            .video_repo
            .list(query.search_text.as_deref(), query.category.as_deref())?;

        for video in videos {
            entries.push(FeedEntry {
                kind: FeedEntryKind::Catalog { video_id: video.id },
                title: video.title,
                source: Some(MediaSource::Local {
                    path: video.file_path,
                }),
                channel: USER_UPLOADS_CHANNEL.to_string(),
                category: video.category,
                likes: video.likes,
                subscribed: subscriptions.contains(USER_UPLOADS_CHANNEL),
            });
        }

        // 2. Static rosters in directory order
        for channel in self.channels.channels() {
            let subscribed = subscriptions.contains(&channel.name);
            for title in &channel.roster {
                entries.push(FeedEntry {
                    kind: FeedEntryKind::Roster,
                    title: title.clone(),
                    source: Some(MediaSource::Remote {
                        url: self.channels.stock_source().to_string(),
                    }),
                    channel: channel.name.clone(),
                    category: "General".to_string(),
                    likes: 0,
                    subscribed,
                });
            }
        }

        // 3. Exactly one sponsored slot, not playable
        if query.ads_enabled {
            entries.push(FeedEntry {
                kind: FeedEntryKind::Sponsored,
                title: "Sponsored Ad".to_string(),
                source: None,
                channel: String::new(),
                category: "Ad".to_string(),
                likes: 0,
                subscribed: false,
            });
        }

        Ok(entries)
    }
}
