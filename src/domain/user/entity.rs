use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
///
/// The credential is opaque to the core: verification goes through the
/// `CredentialVerifier` collaborator, never through string comparison here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Login name, unique across the store
    pub username: String,

    /// Opaque credential material, never empty
    pub credential: String,

    /// Avatar reference (URL or local path)
    pub avatar: Option<String>,

    /// Free-form profile text
    pub bio: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User entity
    /// This is the only way to construct a valid User
    pub fn new(username: String, credential: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            credential,
            avatar: None,
            bio: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Full overwrite of the editable profile fields.
    /// Applying the same values twice leaves the entity unchanged.
    pub fn set_profile(&mut self, avatar: Option<String>, bio: String) {
        self.avatar = avatar;
        self.bio = bio;
    }
}
