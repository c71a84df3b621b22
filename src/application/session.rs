// src/application/session.rs
//
// Per-login session context
//
// Everything the UI shell used to keep in a process-wide bag lives here
// instead, constructed at login and dropped at logout. Two sessions never
// share mutable state, which is what makes multi-user testing direct.

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::domain::{ContentRef, User};
use crate::error::AppResult;
use crate::services::{AccountService, CatalogService};

/// Session-scoped like counters for content with no durable identity.
///
/// Keyed by the synthetic ephemeral id, never by title text: two shorts
/// with the same title still count separately.
#[derive(Debug, Default)]
pub struct EphemeralLikes {
    counts: HashMap<Uuid, u64>,
}

impl EphemeralLikes {
    pub fn bump(&mut self, content_id: Uuid) -> u64 {
        let count = self.counts.entry(content_id).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, content_id: Uuid) -> u64 {
        self.counts.get(&content_id).copied().unwrap_or(0)
    }
}

/// One logged-in user's context.
pub struct UserSession {
    pub user_id: Uuid,
    pub username: String,
    pub avatar: Option<String>,
    pub bio: String,

    /// Snapshot of the subscription relation, kept in step by the
    /// mutation helpers below
    pub subscriptions: BTreeSet<String>,

    /// Viewer preferences, session-scoped like in the original shell
    pub ads_enabled: bool,

    ephemeral_likes: EphemeralLikes,
}

impl UserSession {
    pub fn open(user: User, subscriptions: BTreeSet<String>) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            avatar: user.avatar,
            bio: user.bio,
            subscriptions,
            ads_enabled: true,
            ephemeral_likes: EphemeralLikes::default(),
        }
    }

    /// Route a like by content identity: catalog content goes to the
    /// store's atomic increment, ephemeral content to the session
    /// counter. Returns the new count either way.
    pub fn register_like(
        &mut self,
        content: ContentRef,
        catalog: &CatalogService,
    ) -> AppResult<u64> {
        match content {
            ContentRef::Catalog { video_id } => catalog.increment_like(video_id),
            ContentRef::Ephemeral { content_id } => Ok(self.ephemeral_likes.bump(content_id)),
        }
    }

    pub fn ephemeral_like_count(&self, content_id: Uuid) -> u64 {
        self.ephemeral_likes.count(content_id)
    }

    /// Toggle through the store and mirror the result into the snapshot
    pub fn toggle_subscription(
        &mut self,
        channel_name: &str,
        accounts: &AccountService,
    ) -> AppResult<bool> {
        let subscribed = accounts.toggle_subscription(self.user_id, channel_name)?;

        if subscribed {
            self.subscriptions.insert(channel_name.to_string());
        } else {
            self.subscriptions.remove(channel_name);
        }

        Ok(subscribed)
    }

    /// Persist a profile edit and mirror it into the session
    pub fn save_profile(
        &mut self,
        avatar: Option<String>,
        bio: String,
        accounts: &AccountService,
    ) -> AppResult<()> {
        accounts.update_profile(self.user_id, avatar.as_deref(), &bio)?;
        self.avatar = avatar;
        self.bio = bio;
        Ok(())
    }

    pub fn toggle_ads(&mut self) -> bool {
        self.ads_enabled = !self.ads_enabled;
        self.ads_enabled
    }
}
