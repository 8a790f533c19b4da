//! Handler for serving stored photo evidence.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use civica_core::error::CoreError;
use civica_db::repositories::ImageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/images/{id}
///
/// Stream an evidence file from the upload directory with its stored content
/// type. A missing row and a missing file both surface as 404; the latter is
/// logged because it means the database and the disk disagree.
pub async fn get_image(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        })
    };

    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let path = state.config.upload_dir.join(&image.title);
    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        tracing::error!(image_id = %id, path = %path.display(), error = %e, "Image row exists but file is unreadable");
        not_found()
    })?;

    let content_type = HeaderValue::from_str(&image.mime)
        .map_err(|_| AppError::InternalError(format!("Stored mime type is not a valid header value: {}", image.mime)))?;

    let body = Body::from_stream(ReaderStream::new(file));
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}
