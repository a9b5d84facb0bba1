use thiserror::Error;

use super::MediaKind;

/// Rejections raised at the upload-acceptance boundary, before anything is
/// written to storage.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Invalid file type: {provided}. Allowed {kind} types: {allowed}")]
    InvalidFileType {
        provided: String,
        kind: &'static str,
        allowed: String,
    },

    #[error("File too large: {kind} uploads are limited to {limit} bytes")]
    FileTooLarge { kind: &'static str, limit: usize },
}

/// MIME allow-list check. Runs before the file body is read so rejected
/// uploads never reach storage.
pub fn check_content_type(kind: MediaKind, content_type: &str) -> Result<(), UploadError> {
    let allowed = kind.allowed_content_types();

    if allowed.iter().any(|t| t.eq_ignore_ascii_case(content_type)) {
        return Ok(());
    }

    Err(UploadError::InvalidFileType {
        provided: content_type.to_string(),
        kind: kind.label(),
        allowed: allowed.join(", "),
    })
}

/// Size ceiling check on the buffered file body. The per-route body limit
/// already rejects grossly oversized requests while streaming; this guards
/// the exact per-kind ceiling.
pub fn check_size(kind: MediaKind, size: usize) -> Result<(), UploadError> {
    let limit = kind.max_file_size();

    if size > limit {
        return Err(UploadError::FileTooLarge {
            kind: kind.label(),
            limit,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_image_types_pass() {
        for mime in ["image/jpeg", "image/png", "image/gif", "image/webp"] {
            assert!(check_content_type(MediaKind::Image, mime).is_ok(), "{} rejected", mime);
        }
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        assert!(check_content_type(MediaKind::Image, "IMAGE/PNG").is_ok());
    }

    #[test]
    fn test_disallowed_types_fail_with_descriptive_message() {
        let err = check_content_type(MediaKind::Image, "text/plain").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Invalid file type"), "{}", message);
        assert!(message.contains("text/plain"), "{}", message);
        assert!(message.contains("image/png"), "{}", message);
    }

    #[test]
    fn test_video_types_are_not_valid_images() {
        assert!(check_content_type(MediaKind::Image, "video/mp4").is_err());
        assert!(check_content_type(MediaKind::Video, "video/mp4").is_ok());
    }

    #[test]
    fn test_size_boundary() {
        let limit = MediaKind::Image.max_file_size();
        assert!(check_size(MediaKind::Image, limit).is_ok());
        assert!(check_size(MediaKind::Image, limit + 1).is_err());
        assert!(check_size(MediaKind::Image, 0).is_ok());
    }
}
