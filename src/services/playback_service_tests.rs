// src/services/playback_service_tests.rs
//
// PLAYBACK RECONCILER UNIT TESTS
//
// PURPOSE:
// - Prove resume correctness: stored percent → seek fraction = percent/100
// - Prove a session marks "watching" before any position callback
// - Prove position callbacks persist for catalog targets and never for
//   ephemeral ones
// - Prove Stopped is terminal and silently absorbs late callbacks
// - Prove the speed cycle order and the glitch-free transport sequence

#[cfg(test)]
mod reconciler_tests {
    use std::fs;
    use std::io::Write;
    use std::sync::Arc;

    use mockall::predicate;
    use mockall::Sequence;
    use uuid::Uuid;

    use crate::db::{create_test_pool, get_connection, initialize_database, ConnectionPool};
    use crate::domain::{User, Video};
    use crate::error::AppError;
    use crate::events::create_event_bus;
    use crate::infrastructure::MediaStorage;
    use crate::repositories::{
        SqliteDownloadRepository, SqliteUserRepository, SqliteVideoRepository,
        SqliteWatchHistoryRepository, UserRepository, VideoRepository,
    };
    use crate::services::playback_service::MockPlaybackTransport;
    use crate::services::{
        PlaybackService, PlaybackSessionState, PlaybackTarget, WatchService, SPEED_STEPS,
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        pool: Arc<ConnectionPool>,
        watch_service: Arc<WatchService>,
        user_id: Uuid,
        video_id: Uuid,
    }

    /// Transport that accepts any calls; for tests that assert on state,
    /// not on the transport conversation.
    fn permissive_transport() -> MockPlaybackTransport {
        let mut transport = MockPlaybackTransport::new();
        transport.expect_play().return_const(());
        transport.expect_pause().return_const(());
        transport.expect_seek().return_const(());
        transport.expect_set_rate().return_const(());
        transport.expect_set_muted().return_const(());
        transport
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_test_pool().unwrap());
        {
            let conn = get_connection(&pool).unwrap();
            initialize_database(&conn).unwrap();
        }

        let storage = Arc::new(
            MediaStorage::new(dir.path().join("media"), dir.path().join("downloads")).unwrap(),
        );

        let user_repo = SqliteUserRepository::new(Arc::clone(&pool));
        let video_repo = SqliteVideoRepository::new(Arc::clone(&pool));

        let user = User::new("mika".to_string(), "hunter2".to_string());
        user_repo.insert(&user).unwrap();

        let media_file = dir.path().join("media").join("seed.mp4");
        let mut f = fs::File::create(&media_file).unwrap();
        f.write_all(b"bytes").unwrap();

        let video = Video::new("City Timelapse".to_string(), media_file, Some(user.id))
            .with_duration(300);
        video_repo.insert(&video).unwrap();

        let watch_service = Arc::new(WatchService::new(
            Arc::new(SqliteWatchHistoryRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteDownloadRepository::new(Arc::clone(&pool))),
            Arc::new(SqliteVideoRepository::new(Arc::clone(&pool))),
            storage,
            create_event_bus(),
        ));

        Fixture {
            _dir: dir,
            pool,
            watch_service,
            user_id: user.id,
            video_id: video.id,
        }
    }

    fn playback(fx: &Fixture, transport: MockPlaybackTransport) -> PlaybackService {
        PlaybackService::new(
            Arc::new(SqliteWatchHistoryRepository::new(Arc::clone(&fx.pool))),
            Arc::new(SqliteVideoRepository::new(Arc::clone(&fx.pool))),
            Arc::clone(&fx.watch_service),
            Arc::new(transport),
            create_event_bus(),
        )
    }

    #[test]
    fn test_resume_seeks_to_stored_fraction() {
        let fx = fixture();
        fx.watch_service
            .upsert_progress(fx.user_id, fx.video_id, 40.0, None)
            .unwrap();

        let mut transport = MockPlaybackTransport::new();
        // 40% on a 300s video: the transport is seeked to fraction 0.40
        transport
            .expect_seek()
            .with(predicate::function(|f: &f64| (f - 0.40).abs() < 1e-9))
            .times(1)
            .return_const(());
        transport.expect_play().times(1).return_const(());

        let service = playback(&fx, transport);
        let session = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();

        assert_eq!(
            service.session_state(session).unwrap(),
            PlaybackSessionState::Playing
        );
        // The stored percent survived the immediate re-upsert
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(40.0)
        );
    }

    #[test]
    fn test_fresh_video_starts_at_zero_without_seeking() {
        let fx = fixture();

        let mut transport = MockPlaybackTransport::new();
        transport.expect_seek().times(0);
        transport.expect_play().times(1).return_const(());

        let service = playback(&fx, transport);
        service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();

        // "Watching" is visible before any position callback
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(0.0)
        );
    }

    #[test]
    fn test_unknown_video_is_not_found() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());

        let result =
            service.start_session(fx.user_id, PlaybackTarget::Catalog { video_id: Uuid::new_v4() });
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_position_updates_persist_for_catalog_targets() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();

        service.position_update(session, 150.0, 300.0).unwrap();

        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(50.0)
        );

        // Every callback persists; the last one wins
        service.position_update(session, 225.0, 300.0).unwrap();
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(75.0)
        );
    }

    #[test]
    fn test_non_positive_duration_persists_nothing() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();

        service.position_update(session, 10.0, 0.0).unwrap();
        service.position_update(session, 10.0, -1.0).unwrap();

        // Still the initial 0 written at session start
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(0.0)
        );
    }

    #[test]
    fn test_ephemeral_sessions_never_touch_the_store() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(
                fx.user_id,
                PlaybackTarget::Ephemeral { content_id: Uuid::new_v4() },
            )
            .unwrap();

        service.position_update(session, 30.0, 60.0).unwrap();

        let conn = get_connection(&fx.pool).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM watch_history", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_stopped_is_terminal_and_absorbs_late_updates() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();

        service.position_update(session, 150.0, 300.0).unwrap();
        service.end_session(session).unwrap();

        // A late callback after Stopped is a no-op, not an error
        service.position_update(session, 299.0, 300.0).unwrap();
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(50.0)
        );

        // Ending twice is also a no-op
        service.end_session(session).unwrap();
        assert_eq!(
            service.session_state(session).unwrap(),
            PlaybackSessionState::Stopped
        );
    }

    #[test]
    fn test_toggle_pause_round_trips() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();

        assert!(!service.toggle_pause(session).unwrap());
        assert_eq!(
            service.session_state(session).unwrap(),
            PlaybackSessionState::Paused
        );

        // Paused sessions still accept position callbacks
        service.position_update(session, 30.0, 300.0).unwrap();
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(10.0)
        );

        assert!(service.toggle_pause(session).unwrap());
        assert_eq!(
            service.session_state(session).unwrap(),
            PlaybackSessionState::Playing
        );
    }

    #[test]
    fn test_speed_cycle_wraps() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(
                fx.user_id,
                PlaybackTarget::Ephemeral { content_id: Uuid::new_v4() },
            )
            .unwrap();

        assert_eq!(service.current_speed(session).unwrap(), 1.0);

        // 1.0 → 1.5 → 2.0 → 0.5 → 1.0
        assert_eq!(service.change_speed(session).unwrap(), 1.5);
        assert_eq!(service.change_speed(session).unwrap(), 2.0);
        assert_eq!(service.change_speed(session).unwrap(), 0.5);
        assert_eq!(service.change_speed(session).unwrap(), 1.0);

        assert_eq!(SPEED_STEPS.len(), 4);
    }

    #[test]
    fn test_speed_change_transport_sequence_is_glitch_free() {
        let fx = fixture();

        let mut transport = MockPlaybackTransport::new();
        let mut seq = Sequence::new();

        // Session start
        transport
            .expect_play()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        // pause → mute → rate → unmute → resume
        transport
            .expect_pause()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        transport
            .expect_set_muted()
            .with(predicate::eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        transport
            .expect_set_rate()
            .with(predicate::eq(1.5f32))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        transport
            .expect_set_muted()
            .with(predicate::eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        transport
            .expect_play()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let service = playback(&fx, transport);
        let session = service
            .start_session(
                fx.user_id,
                PlaybackTarget::Ephemeral { content_id: Uuid::new_v4() },
            )
            .unwrap();

        assert_eq!(service.change_speed(session).unwrap(), 1.5);
    }

    #[test]
    fn test_speed_change_after_stop_is_rejected() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());
        let session = service
            .start_session(
                fx.user_id,
                PlaybackTarget::Ephemeral { content_id: Uuid::new_v4() },
            )
            .unwrap();

        service.end_session(session).unwrap();

        assert!(service.change_speed(session).is_err());
        assert!(service.toggle_pause(session).is_err());
    }

    #[test]
    fn test_two_sessions_for_the_same_pair_last_writer_wins() {
        let fx = fixture();
        let service = playback(&fx, permissive_transport());

        let first = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();
        service.position_update(first, 60.0, 300.0).unwrap();
        service.end_session(first).unwrap();

        let second = service
            .start_session(fx.user_id, PlaybackTarget::Catalog { video_id: fx.video_id })
            .unwrap();
        service.position_update(second, 240.0, 300.0).unwrap();
        service.end_session(second).unwrap();

        // One row, holding the second session's final observation
        let conn = get_connection(&fx.pool).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM watch_history", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        // Release the single pooled connection before calling back into a
        // service that needs one (the test pool is max_size(1)).
        drop(conn);
        assert_eq!(
            fx.watch_service.progress(fx.user_id, fx.video_id).unwrap(),
            Some(80.0)
        );
    }
}
