//! Evidence file storage on the local filesystem.
//!
//! Files are written synchronously (from the request's point of view) before
//! the image record and report row are created. Filenames are derived by
//! `civica_core::uploads::stored_filename`, which strips path components, so
//! writes cannot escape the upload directory.

use std::path::{Path, PathBuf};

/// An image part lifted out of a multipart request body.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied filename, not yet sanitized.
    pub original_filename: String,
    /// Declared content type of the part.
    pub mime: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

/// Write an uploaded file under `dir`, creating the directory if needed.
pub async fn save_evidence(dir: &Path, filename: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let dest = dir.join(filename);
    tokio::fs::write(&dest, data).await?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use civica_core::uploads::stored_filename;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_save_evidence_creates_dir_and_file() {
        let tmp = tempfile::tempdir().expect("tempdir should be created");
        let dir = tmp.path().join("uploads");

        let name = stored_filename(Uuid::new_v4(), "hueco.jpg");
        let dest = save_evidence(&dir, &name, b"jpeg bytes")
            .await
            .expect("write should succeed");

        let written = tokio::fs::read(&dest).await.expect("file should exist");
        assert_eq!(written, b"jpeg bytes");
        assert!(dest.starts_with(&dir));
    }

    #[tokio::test]
    async fn test_sanitized_name_cannot_escape_dir() {
        let tmp = tempfile::tempdir().expect("tempdir should be created");
        let dir = tmp.path().join("uploads");

        let name = stored_filename(Uuid::new_v4(), "../../escape.jpg");
        let dest = save_evidence(&dir, &name, b"data")
            .await
            .expect("write should succeed");

        assert!(dest.starts_with(&dir), "stored file must stay inside the upload dir");
        assert!(dest.file_name().is_some());
    }
}
