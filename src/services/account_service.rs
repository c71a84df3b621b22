// src/services/account_service.rs
//
// Account & Subscription Service
//
// Owns account lifecycle and the subscription relation. Credential
// verification is delegated to a collaborator so the core never compares
// secrets itself.

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{validate_new_user, ChannelDirectory, User};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SubscriptionChanged, UserRegistered};
use crate::repositories::{SubscriptionRepository, UserRepository};

/// Checks a presented credential against the stored material.
///
/// Hardening (hashing, rate limits) is outside this core; implementations
/// only answer yes or no.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, presented: &str, stored: &str) -> bool;
}

/// Literal comparison, matching credential material stored as entered
pub struct PlainTextVerifier;

impl CredentialVerifier for PlainTextVerifier {
    fn verify(&self, presented: &str, stored: &str) -> bool {
        presented == stored
    }
}

pub struct AccountService {
    user_repo: Arc<dyn UserRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    channels: Arc<ChannelDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
    event_bus: Arc<EventBus>,
    /// Channels seeded into fresh or emptied subscription lists
    default_subscriptions: Vec<String>,
}

impl AccountService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        channels: Arc<ChannelDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
        event_bus: Arc<EventBus>,
        default_subscriptions: Vec<String>,
    ) -> Self {
        Self {
            user_repo,
            subscription_repo,
            channels,
            verifier,
            event_bus,
            default_subscriptions,
        }
    }

    /// Create an account. Duplicate usernames surface as Conflict; the
    /// new account starts subscribed to the configured defaults.
    pub fn create_user(&self, username: &str, credential: &str) -> AppResult<Uuid> {
        let user = User::new(username.trim().to_string(), credential.to_string());
        validate_new_user(&user)?;

        self.user_repo.insert(&user)?;

        for channel in &self.default_subscriptions {
            self.subscription_repo.add(user.id, channel)?;
        }

        log::info!("account created: {}", user.username);
        self.event_bus
            .emit(UserRegistered::new(user.id, user.username.clone()));

        Ok(user.id)
    }

    /// Pure lookup: a wrong username or credential returns None, never
    /// an error.
    pub fn authenticate(&self, username: &str, credential: &str) -> AppResult<Option<User>> {
        let user = match self.user_repo.get_by_username(username)? {
            Some(u) => u,
            None => return Ok(None),
        };

        if self.verifier.verify(credential, &user.credential) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Full overwrite of both profile fields; applying the same values
    /// twice is a no-op.
    pub fn update_profile(
        &self,
        user_id: Uuid,
        avatar: Option<&str>,
        bio: &str,
    ) -> AppResult<()> {
        self.user_repo.update_profile(user_id, avatar, bio)
    }

    pub fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.user_repo.get_by_id(user_id)
    }

    /// Idempotent: subscribing twice is a no-op
    pub fn subscribe(&self, user_id: Uuid, channel_name: &str) -> AppResult<()> {
        if !self.channels.is_known(channel_name) {
            return Err(AppError::NotFound);
        }
        self.subscription_repo.add(user_id, channel_name)
    }

    /// Idempotent: unsubscribing a non-subscriber is a no-op
    pub fn unsubscribe(&self, user_id: Uuid, channel_name: &str) -> AppResult<()> {
        if !self.channels.is_known(channel_name) {
            return Err(AppError::NotFound);
        }
        self.subscription_repo.remove(user_id, channel_name)
    }

    /// Flip membership and return the new state
    pub fn toggle_subscription(&self, user_id: Uuid, channel_name: &str) -> AppResult<bool> {
        if !self.channels.is_known(channel_name) {
            return Err(AppError::NotFound);
        }

        let subscribed = if self.subscription_repo.contains(user_id, channel_name)? {
            self.subscription_repo.remove(user_id, channel_name)?;
            false
        } else {
            self.subscription_repo.add(user_id, channel_name)?;
            true
        };

        self.event_bus.emit(SubscriptionChanged::new(
            user_id,
            channel_name.to_string(),
            subscribed,
        ));

        Ok(subscribed)
    }

    /// The user's channel set. An empty list is seeded with the
    /// configured defaults, and the seed is persisted.
    pub fn list_subscriptions(&self, user_id: Uuid) -> AppResult<BTreeSet<String>> {
        let subscriptions = self.subscription_repo.list_for_user(user_id)?;
        if !subscriptions.is_empty() {
            return Ok(subscriptions);
        }

        for channel in &self.default_subscriptions {
            self.subscription_repo.add(user_id, channel)?;
        }

        self.subscription_repo.list_for_user(user_id)
    }
}
