// src/services/playback_service.rs
//
// Playback Reconciler
//
// Bridges the external playback transport and the watch-state store:
// - Computes the resume point when a session starts
// - Normalizes position callbacks into a progress percentage
// - Persists progress for catalog-backed sessions
// - Cycles playback speed without audible glitches
//
// The transport drives the callback cadence; this service schedules
// nothing itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::events::{EventBus, PlaybackEnded, PlaybackProgressUpdated, PlaybackStarted};
use crate::repositories::{VideoRepository, WatchHistoryRepository};
use crate::services::watch_service::WatchService;

/// Playback speed cycle; change_speed wraps back to the first step
pub const SPEED_STEPS: [f32; 4] = [0.5, 1.0, 1.5, 2.0];

/// The external player surface this core drives.
///
/// Implementations live outside the core (a real player window); tests
/// use generated mocks.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackTransport: Send + Sync {
    fn play(&self);
    fn pause(&self);
    /// Seek to a fraction of the media duration, in [0, 1]
    fn seek(&self, fraction: f64);
    fn set_rate(&self, rate: f32);
    fn set_muted(&self, muted: bool);
}

/// What a session is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    /// Catalog-backed: progress persists across sessions
    Catalog { video_id: Uuid },
    /// Ephemeral: known for this process only, nothing persisted
    Ephemeral { content_id: Uuid },
}

/// Session lifecycle; Stopped is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSessionState {
    Idle,
    Starting,
    Playing,
    Paused,
    Stopped,
}

struct PlaybackSession {
    user_id: Uuid,
    target: PlaybackTarget,
    state: PlaybackSessionState,
    speed_index: usize,
    last_percent: f64,
}

pub struct PlaybackService {
    watch_repo: Arc<dyn WatchHistoryRepository>,
    video_repo: Arc<dyn VideoRepository>,
    watch_service: Arc<WatchService>,
    transport: Arc<dyn PlaybackTransport>,
    event_bus: Arc<EventBus>,
    sessions: Mutex<HashMap<Uuid, PlaybackSession>>,
}

impl PlaybackService {
    pub fn new(
        watch_repo: Arc<dyn WatchHistoryRepository>,
        video_repo: Arc<dyn VideoRepository>,
        watch_service: Arc<WatchService>,
        transport: Arc<dyn PlaybackTransport>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            watch_repo,
            video_repo,
            watch_service,
            transport,
            event_bus,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a playback session and return its handle.
    ///
    /// Catalog targets resume from the stored percentage (fraction =
    /// percent / 100) and get their watch row upserted immediately, so
    /// "watching" is visible before the first position callback arrives.
    pub fn start_session(&self, user_id: Uuid, target: PlaybackTarget) -> AppResult<Uuid> {
        let session_id = Uuid::new_v4();

        let mut session = PlaybackSession {
            user_id,
            target,
            state: PlaybackSessionState::Starting,
            // Sessions always open at normal speed
            speed_index: 1,
            last_percent: 0.0,
        };

        let resume_fraction = match target {
            PlaybackTarget::Catalog { video_id } => {
                if !self.video_repo.exists(video_id)? {
                    return Err(AppError::NotFound);
                }

                let prior_percent = self
                    .watch_repo
                    .get(user_id, video_id)?
                    .map(|p| p.progress_percent)
                    .unwrap_or(0.0);

                self.watch_service
                    .upsert_progress(user_id, video_id, prior_percent, None)?;

                session.last_percent = prior_percent;
                prior_percent / 100.0
            }
            PlaybackTarget::Ephemeral { .. } => 0.0,
        };

        if resume_fraction > 0.0 {
            self.transport.seek(resume_fraction);
        }
        self.transport.play();
        session.state = PlaybackSessionState::Playing;

        self.sessions.lock().unwrap().insert(session_id, session);

        log::debug!("playback session {} started", session_id);
        self.event_bus
            .emit(PlaybackStarted::new(session_id, resume_fraction));

        Ok(session_id)
    }

    /// Handle one position callback from the transport.
    ///
    /// Persists on every call for catalog targets. A non-positive
    /// duration persists nothing (the transport has not probed the media
    /// yet). Updates after the session stopped are silently ignored.
    pub fn position_update(
        &self,
        session_id: Uuid,
        position_seconds: f64,
        duration_seconds: f64,
    ) -> AppResult<()> {
        let (user_id, target, percent) = {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions.get_mut(&session_id).ok_or(AppError::NotFound)?;

            if session.state == PlaybackSessionState::Stopped {
                return Ok(());
            }
            if duration_seconds <= 0.0 {
                return Ok(());
            }

            let percent = (position_seconds / duration_seconds * 100.0).clamp(0.0, 100.0);
            session.last_percent = percent;
            (session.user_id, session.target, percent)
        };

        if let PlaybackTarget::Catalog { video_id } = target {
            self.watch_service
                .upsert_progress(user_id, video_id, percent, None)?;
        }

        self.event_bus
            .emit(PlaybackProgressUpdated::new(session_id, percent));

        Ok(())
    }

    /// Flip Playing ⇄ Paused; returns true when the session is playing
    /// afterwards.
    pub fn toggle_pause(&self, session_id: Uuid) -> AppResult<bool> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(&session_id).ok_or(AppError::NotFound)?;

        match session.state {
            PlaybackSessionState::Playing => {
                self.transport.pause();
                session.state = PlaybackSessionState::Paused;
                Ok(false)
            }
            PlaybackSessionState::Paused => {
                self.transport.play();
                session.state = PlaybackSessionState::Playing;
                Ok(true)
            }
            other => Err(AppError::Validation(
                crate::domain::DomainError::InvalidStateTransition(format!(
                    "cannot toggle pause from {:?}",
                    other
                )),
            )),
        }
    }

    /// Advance the speed cycle and return the new multiplier.
    ///
    /// The transport is driven as pause → mute → rate → unmute → resume
    /// so the rate switch is not audible.
    pub fn change_speed(&self, session_id: Uuid) -> AppResult<f32> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(&session_id).ok_or(AppError::NotFound)?;

        if session.state == PlaybackSessionState::Stopped {
            return Err(AppError::Validation(
                crate::domain::DomainError::InvalidStateTransition(
                    "cannot change speed after the session stopped".to_string(),
                ),
            ));
        }

        session.speed_index = (session.speed_index + 1) % SPEED_STEPS.len();
        let new_speed = SPEED_STEPS[session.speed_index];

        self.transport.pause();
        self.transport.set_muted(true);
        self.transport.set_rate(new_speed);
        self.transport.set_muted(false);
        self.transport.play();

        Ok(new_speed)
    }

    pub fn current_speed(&self, session_id: Uuid) -> AppResult<f32> {
        let sessions = self.sessions.lock().unwrap();
        let session = sessions.get(&session_id).ok_or(AppError::NotFound)?;
        Ok(SPEED_STEPS[session.speed_index])
    }

    /// Terminal transition. Ending an already-stopped session is a no-op;
    /// the session handle stays valid so late position callbacks can be
    /// recognized and ignored.
    pub fn end_session(&self, session_id: Uuid) -> AppResult<()> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.get_mut(&session_id).ok_or(AppError::NotFound)?;

        if session.state == PlaybackSessionState::Stopped {
            return Ok(());
        }

        self.transport.pause();
        session.state = PlaybackSessionState::Stopped;

        log::debug!("playback session {} ended", session_id);
        self.event_bus.emit(PlaybackEnded::new(session_id));

        Ok(())
    }

    pub fn session_state(&self, session_id: Uuid) -> AppResult<PlaybackSessionState> {
        let sessions = self.sessions.lock().unwrap();
        let session = sessions.get(&session_id).ok_or(AppError::NotFound)?;
        Ok(session.state)
    }
}
