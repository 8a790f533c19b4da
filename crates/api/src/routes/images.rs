//! Route definitions for stored photo evidence.

use axum::routing::get;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Image routes mounted at `/images`.
///
/// ```text
/// GET /{id}   -> get_image (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(images::get_image))
}
