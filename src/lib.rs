// src/lib.rs
// StreamHub - Viewing-state & library synchronization core
//
// Architecture:
// - Domain-centric: All business logic lives in domains
// - Event-driven: Services coordinate through events
// - Explicit: No implicit behavior, no magic
// - Local-first: User controls all data
// - Application Layer: UI boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_comment_text,
    validate_new_user,
    validate_profile,
    validate_video,
    // Channel
    Channel,
    ChannelDirectory,
    // Comment
    Comment,
    CommentView,
    // Video
    ContentRef,
    // Watch state
    Download,
    DownloadEntry,
    EphemeralVideo,
    // Feed
    FeedEntry,
    FeedEntryKind,
    FeedQuery,
    HistoryEntry,
    MediaSource,
    // User
    User,
    Video,
    WatchProgress,
    USER_UPLOADS_CHANNEL,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    CommentPosted,
    DomainEvent,
    EventBus,
    EventLogEntry,
    PlaybackEnded,
    PlaybackProgressUpdated,
    PlaybackStarted,
    SubscriptionChanged,
    UserRegistered,
    VideoDownloaded,
    VideoLiked,
    VideoUploaded,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::AppConfig;

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CommentRepository,
    DownloadRepository,
    SqliteCommentRepository,
    SqliteDownloadRepository,
    SqliteSubscriptionRepository,
    SqliteUserRepository,
    SqliteVideoRepository,
    SqliteWatchHistoryRepository,
    SubscriptionRepository,
    UserRepository,
    VideoRepository,
    WatchHistoryRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::MediaStorage;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Account Service
    AccountService,
    // Catalog Service
    CatalogService,
    // Comment Service
    CommentService,
    CredentialVerifier,
    // Feed Assembler
    FeedService,
    // Notifications
    NotificationService,
    PlainTextVerifier,
    // Playback Reconciler
    PlaybackService,
    PlaybackSessionState,
    PlaybackTarget,
    PlaybackTransport,
    UploadVideoRequest,
    // Watch-State Service
    WatchService,
    SPEED_STEPS,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, EphemeralLikes, UserSession};
