// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod account_service;
pub mod catalog_service;
pub mod comment_service;
pub mod feed_service;
pub mod notification_service;
pub mod playback_service;
pub mod watch_service;

#[cfg(test)]
mod feed_service_tests;
#[cfg(test)]
mod playback_service_tests;

// Re-export all services and their types
pub use account_service::{AccountService, CredentialVerifier, PlainTextVerifier};

pub use catalog_service::{CatalogService, UploadVideoRequest};

pub use comment_service::CommentService;

pub use feed_service::FeedService;

pub use notification_service::NotificationService;

pub use playback_service::{
    PlaybackService, PlaybackSessionState, PlaybackTarget, PlaybackTransport, SPEED_STEPS,
};

pub use watch_service::WatchService;
