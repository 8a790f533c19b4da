//! Stored-filename derivation and mime allow-list for uploaded photo evidence.
//!
//! Uploaded files are stored flat in a single directory, so the original
//! filename must be reduced to a safe basename before it touches the
//! filesystem. The stored name is `<user_id>-<sanitized original>`, which
//! also disambiguates identical filenames uploaded by different users.

use uuid::Uuid;

/// Mime types accepted for report photo evidence.
pub const ALLOWED_IMAGE_MIMES: &[&str] = &["image/jpeg", "image/png"];

/// Maximum accepted upload size in bytes (100 MB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Fallback basename when sanitization strips everything.
const FALLBACK_BASENAME: &str = "upload";

/// Check whether a content type is an accepted evidence image format.
pub fn is_allowed_image_mime(mime: &str) -> bool {
    ALLOWED_IMAGE_MIMES.contains(&mime)
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Takes the final path component (both `/` and `\` separators), drops any
/// character outside `[A-Za-z0-9._-]`, and collapses a fully-stripped or
/// dot-only result to a fallback. The result never contains a path separator
/// or a `..` component.
pub fn sanitize_filename(original: &str) -> String {
    let basename = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let cleaned: String = basename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        FALLBACK_BASENAME.to_string()
    } else {
        cleaned
    }
}

/// Derive the on-disk filename for an upload: `<user_id>-<sanitized original>`.
pub fn stored_filename(user_id: Uuid, original: &str) -> String {
    format!("{user_id}-{}", sanitize_filename(original))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("pothole.jpg"), "pothole.jpg");
        assert_eq!(sanitize_filename("street-light_2.png"), "street-light_2.png");
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/absolute/path/photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("C:\\Users\\evil\\photo.png"), "photo.png");
    }

    #[test]
    fn test_sanitize_drops_unsafe_characters() {
        assert_eq!(sanitize_filename("ph oto!.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("foo\0bar.png"), "foobar.png");
    }

    #[test]
    fn test_sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_filename(""), "upload");
        assert_eq!(sanitize_filename("///"), "upload");
        assert_eq!(sanitize_filename(".."), "upload");
        assert_eq!(sanitize_filename("¡¿!"), "upload");
    }

    #[test]
    fn test_stored_filename_prefixes_user_id() {
        let user_id = Uuid::new_v4();
        let name = stored_filename(user_id, "hueco.jpg");
        assert_eq!(name, format!("{user_id}-hueco.jpg"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_mime_allow_list() {
        assert!(is_allowed_image_mime("image/jpeg"));
        assert!(is_allowed_image_mime("image/png"));
        assert!(!is_allowed_image_mime("image/gif"));
        assert!(!is_allowed_image_mime("application/pdf"));
    }
}
