// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{create_connection_pool, get_connection, initialize_database, ConnectionPool};
use crate::domain::ChannelDirectory;
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::infrastructure::MediaStorage;
use crate::repositories::{
    SqliteCommentRepository, SqliteDownloadRepository, SqliteSubscriptionRepository,
    SqliteUserRepository, SqliteVideoRepository, SqliteWatchHistoryRepository,
};
use crate::services::{
    AccountService, CatalogService, CommentService, CredentialVerifier, FeedService,
    NotificationService, PlainTextVerifier, PlaybackService, PlaybackTransport, WatchService,
};

/// Fully wired application core.
///
/// All fields are Arc-wrapped for thread-safe sharing with the UI shell.
/// Construction order: pool → schema → storage → repositories → services.
pub struct AppState {
    pub config: AppConfig,
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub channels: Arc<ChannelDirectory>,
    pub account_service: Arc<AccountService>,
    pub catalog_service: Arc<CatalogService>,
    pub watch_service: Arc<WatchService>,
    pub comment_service: Arc<CommentService>,
    pub feed_service: Arc<FeedService>,
    pub playback_service: Arc<PlaybackService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    /// Wire the core against the configured database file with the
    /// default collaborators.
    pub fn new(config: AppConfig, transport: Arc<dyn PlaybackTransport>) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool(&config.database_path)?);
        Self::with_pool(config, pool, transport, Arc::new(PlainTextVerifier))
    }

    /// Wire the core over an existing pool (tests use an in-memory one).
    pub fn with_pool(
        config: AppConfig,
        pool: Arc<ConnectionPool>,
        transport: Arc<dyn PlaybackTransport>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> AppResult<Self> {
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        let storage = Arc::new(MediaStorage::new(
            config.media_dir.clone(),
            config.downloads_dir.clone(),
        )?);

        let event_bus = create_event_bus();
        let channels = Arc::new(ChannelDirectory::builtin());

        let user_repo = Arc::new(SqliteUserRepository::new(Arc::clone(&pool)));
        let video_repo = Arc::new(SqliteVideoRepository::new(Arc::clone(&pool)));
        let subscription_repo = Arc::new(SqliteSubscriptionRepository::new(Arc::clone(&pool)));
        let watch_repo = Arc::new(SqliteWatchHistoryRepository::new(Arc::clone(&pool)));
        let download_repo = Arc::new(SqliteDownloadRepository::new(Arc::clone(&pool)));
        let comment_repo = Arc::new(SqliteCommentRepository::new(Arc::clone(&pool)));

        let account_service = Arc::new(AccountService::new(
            user_repo.clone(),
            subscription_repo.clone(),
            Arc::clone(&channels),
            verifier,
            Arc::clone(&event_bus),
            config.default_subscriptions.clone(),
        ));

        let catalog_service = Arc::new(CatalogService::new(
            video_repo.clone(),
            user_repo.clone(),
            Arc::clone(&storage),
            Arc::clone(&event_bus),
        ));

        let watch_service = Arc::new(WatchService::new(
            watch_repo.clone(),
            download_repo.clone(),
            video_repo.clone(),
            Arc::clone(&storage),
            Arc::clone(&event_bus),
        ));

        let comment_service = Arc::new(CommentService::new(
            comment_repo.clone(),
            video_repo.clone(),
            Arc::clone(&event_bus),
        ));

        let feed_service = Arc::new(FeedService::new(video_repo.clone(), Arc::clone(&channels)));

        let playback_service = Arc::new(PlaybackService::new(
            watch_repo.clone(),
            video_repo.clone(),
            Arc::clone(&watch_service),
            transport,
            Arc::clone(&event_bus),
        ));

        let notification_service = Arc::new(NotificationService::new());
        notification_service.attach(&event_bus);

        Ok(Self {
            config,
            pool,
            event_bus,
            channels,
            account_service,
            catalog_service,
            watch_service,
            comment_service,
            feed_service,
            playback_service,
            notification_service,
        })
    }

    /// Authenticate and build the per-login session context.
    /// Bad credentials yield None, never an error.
    pub fn login(
        &self,
        username: &str,
        credential: &str,
    ) -> AppResult<Option<crate::application::UserSession>> {
        let user = match self.account_service.authenticate(username, credential)? {
            Some(u) => u,
            None => return Ok(None),
        };

        let subscriptions = self.account_service.list_subscriptions(user.id)?;

        Ok(Some(crate::application::UserSession::open(
            user,
            subscriptions,
        )))
    }
}
