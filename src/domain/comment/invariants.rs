use crate::domain::{DomainError, DomainResult};

/// Comment text must carry content after trimming
pub fn validate_comment_text(text: &str) -> DomainResult<()> {
    if text.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Comment text cannot be empty".to_string(),
        ));
    }
    Ok(())
}
