//! Repository for the `images` table.
//!
//! Image rows are created exactly once per uploaded file, immediately before
//! the owning report; they are referenced by reports, never owned.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::image::{CreateImage, Image};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "image_id, title, mime, created_at, updated_at, deleted_at";

/// Provides create/read operations for uploaded image metadata.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (title, mime)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, Image>(&query)
            .bind(&input.title)
            .bind(&input.mime)
            .fetch_one(pool)
            .await?;
        tracing::debug!(image_id = %image.image_id, mime = %image.mime, "Image row inserted");
        Ok(image)
    }

    /// Find a non-deleted image by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE image_id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
