// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// ACCOUNT EVENTS
// ============================================================================

/// Emitted when a new account is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
}

impl UserRegistered {
    pub fn new(user_id: Uuid, username: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            username,
        }
    }
}

impl DomainEvent for UserRegistered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "UserRegistered" }
}

/// Emitted when a subscription toggle lands; `subscribed` is the new state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub channel_name: String,
    pub subscribed: bool,
}

impl SubscriptionChanged {
    pub fn new(user_id: Uuid, channel_name: String, subscribed: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            channel_name,
            subscribed,
        }
    }
}

impl DomainEvent for SubscriptionChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SubscriptionChanged" }
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted after an upload fully commits (file copied AND row inserted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoUploaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub video_id: Uuid,
    pub title: String,
    pub category: String,
}

impl VideoUploaded {
    pub fn new(video_id: Uuid, title: String, category: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            video_id,
            title,
            category,
        }
    }
}

impl DomainEvent for VideoUploaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoUploaded" }
}

/// Emitted when a catalog like lands; carries the post-increment count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLiked {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub video_id: Uuid,
    pub like_count: u64,
}

impl VideoLiked {
    pub fn new(video_id: Uuid, like_count: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            video_id,
            like_count,
        }
    }
}

impl DomainEvent for VideoLiked {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoLiked" }
}

// ============================================================================
// COMMENT EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPosted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub comment_id: Uuid,
    pub video_id: Uuid,
    pub user_id: Uuid,
}

impl CommentPosted {
    pub fn new(comment_id: Uuid, video_id: Uuid, user_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            comment_id,
            video_id,
            user_id,
        }
    }
}

impl DomainEvent for CommentPosted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CommentPosted" }
}

// ============================================================================
// WATCH-STATE EVENTS
// ============================================================================

/// Emitted after a download commits (file copied AND row upserted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDownloaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub video_id: Uuid,
    pub local_path: PathBuf,
}

impl VideoDownloaded {
    pub fn new(user_id: Uuid, video_id: Uuid, local_path: PathBuf) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            video_id,
            local_path,
        }
    }
}

impl DomainEvent for VideoDownloaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "VideoDownloaded" }
}

// ============================================================================
// PLAYBACK EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    /// Fraction in [0, 1] the transport was asked to seek to
    pub resume_fraction: f64,
}

impl PlaybackStarted {
    pub fn new(session_id: Uuid, resume_fraction: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            resume_fraction,
        }
    }
}

impl DomainEvent for PlaybackStarted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PlaybackStarted" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackProgressUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
    pub progress_percent: f64,
}

impl PlaybackProgressUpdated {
    pub fn new(session_id: Uuid, progress_percent: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
            progress_percent,
        }
    }
}

impl DomainEvent for PlaybackProgressUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PlaybackProgressUpdated" }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackEnded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub session_id: Uuid,
}

impl PlaybackEnded {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            session_id,
        }
    }
}

impl DomainEvent for PlaybackEnded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PlaybackEnded" }
}
