// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};
pub use types::DomainEvent;

pub use types::{
    CommentPosted, PlaybackEnded, PlaybackProgressUpdated, PlaybackStarted, SubscriptionChanged,
    UserRegistered, VideoDownloaded, VideoLiked, VideoUploaded,
};

use std::sync::Arc;

/// Create a shared event bus
pub fn create_event_bus() -> Arc<EventBus> {
    Arc::new(EventBus::new())
}
