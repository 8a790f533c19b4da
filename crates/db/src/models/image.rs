//! Image (photo evidence) entity model and DTO.

use civica_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An image row from the `images` table. `title` is the stored filename on
/// disk under the upload directory.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub image_id: Uuid,
    pub title: String,
    pub mime: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new image record.
#[derive(Debug, Deserialize)]
pub struct CreateImage {
    /// Stored filename on disk.
    pub title: String,
    pub mime: String,
}
