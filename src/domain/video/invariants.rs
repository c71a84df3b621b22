use super::entity::Video;
use crate::domain::{DomainError, DomainResult};

/// Validates all Video invariants
pub fn validate_video(video: &Video) -> DomainResult<()> {
    if video.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Video title cannot be empty".to_string(),
        ));
    }
    if video.category.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Video category cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Video domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Title is never empty
/// 3. Like count never goes negative (store increments only)
/// 4. Category always has a value ("General" when unspecified)
/// 5. uploader_id references an existing user, or is None for seeded content

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_video() {
        let video = Video::new(
            "City Timelapse".to_string(),
            PathBuf::from("/media/v1.mp4"),
            None,
        );
        assert!(validate_video(&video).is_ok());
    }

    #[test]
    fn test_empty_title_fails() {
        let video = Video::new("  ".to_string(), PathBuf::from("/media/v1.mp4"), None);
        assert!(validate_video(&video).is_err());
    }

    #[test]
    fn test_blank_category_collapses_to_default() {
        let video = Video::new("Clip".to_string(), PathBuf::from("/m/v.mp4"), None)
            .with_category(Some("   ".to_string()));
        assert_eq!(video.category, "General");
    }
}
