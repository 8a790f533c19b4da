//! Route definitions for citizen reports.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch};
use axum::Router;

use civica_core::uploads::MAX_UPLOAD_BYTES;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes mounted at `/reports`.
///
/// Create and update may carry multipart evidence uploads, so the body limit
/// on this subtree is raised to the upload ceiling.
///
/// ```text
/// POST   /                       -> create_report (auth)
/// GET    /                       -> list_reports (admin, ?q=&state=&type_id=)
/// GET    /mine                   -> my_reports (auth)
/// GET    /opened                 -> list_opened_reports (admin)
/// GET    /by-month               -> reports_by_month (admin)
/// GET    /by-state-and-month     -> reports_by_state_and_month (admin)
/// GET    /{id}                   -> get_report (owner or admin)
/// PATCH  /{id}                   -> update_report (owner)
/// DELETE /{id}                   -> delete_report (owner)
/// PATCH  /{id}/opened            -> open_report (admin)
/// PATCH  /{id}/in-progress       -> start_report (admin)
/// PATCH  /{id}/solved            -> solve_report (admin)
/// PATCH  /{id}/closed            -> close_report (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/mine", get(reports::my_reports))
        .route("/opened", get(reports::list_opened_reports))
        .route("/by-month", get(reports::reports_by_month))
        .route(
            "/by-state-and-month",
            get(reports::reports_by_state_and_month),
        )
        .route(
            "/{id}",
            get(reports::get_report)
                .patch(reports::update_report)
                .delete(reports::delete_report),
        )
        .route("/{id}/opened", patch(reports::open_report))
        .route("/{id}/in-progress", patch(reports::start_report))
        .route("/{id}/solved", patch(reports::solve_report))
        .route("/{id}/closed", patch(reports::close_report))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
