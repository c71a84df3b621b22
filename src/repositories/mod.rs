// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod comment_repository;
pub mod download_repository;
pub mod subscription_repository;
pub mod user_repository;
pub mod video_repository;
pub mod watch_history_repository;

pub use comment_repository::{CommentRepository, SqliteCommentRepository};
pub use download_repository::{DownloadRepository, SqliteDownloadRepository};
pub use subscription_repository::{SqliteSubscriptionRepository, SubscriptionRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
pub use video_repository::{SqliteVideoRepository, VideoRepository};
pub use watch_history_repository::{SqliteWatchHistoryRepository, WatchHistoryRepository};
