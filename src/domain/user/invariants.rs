use super::entity::User;
use crate::domain::{DomainError, DomainResult};

/// Validates the invariants a freshly created account must satisfy
pub fn validate_new_user(user: &User) -> DomainResult<()> {
    if user.username.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Username cannot be empty".to_string(),
        ));
    }
    if user.credential.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Credential cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Profile edits never clear the identity fields
pub fn validate_profile(user: &User) -> DomainResult<()> {
    if user.username.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Username cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the User domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Username is unique (enforced by the store)
/// 3. Credential is never empty
/// 4. Bio and avatar may be empty/absent
/// 5. Created timestamp never changes
