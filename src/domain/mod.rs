// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod channel;
pub mod comment;
pub mod feed;
pub mod user;
pub mod video;
pub mod watch;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// User Domain
pub use user::{validate_new_user, validate_profile, User};

// Video Domain
pub use video::{validate_video, ContentRef, EphemeralVideo, Video};

// Channel Domain (static seed data, never persisted)
pub use channel::{Channel, ChannelDirectory, USER_UPLOADS_CHANNEL};

// Comment Domain
pub use comment::{validate_comment_text, Comment, CommentView};

// Watch Domain
pub use watch::{Download, DownloadEntry, HistoryEntry, WatchProgress};

// Feed Domain
pub use feed::{FeedEntry, FeedEntryKind, FeedQuery, MediaSource};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
