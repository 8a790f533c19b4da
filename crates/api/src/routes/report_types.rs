//! Route definitions for the report taxonomy.

use axum::routing::get;
use axum::Router;

use crate::handlers::report_types;
use crate::state::AppState;

/// Report type routes mounted at `/report-types`.
///
/// ```text
/// GET    /                 -> list_report_types (auth)
/// POST   /                 -> create_report_type (admin)
/// GET    /most-reported    -> most_reported_types (admin)
/// GET    /by-state         -> reports_by_state (admin)
/// GET    /{id}             -> get_report_type (admin)
/// PATCH  /{id}             -> update_report_type (admin)
/// DELETE /{id}             -> delete_report_type (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(report_types::list_report_types).post(report_types::create_report_type),
        )
        .route("/most-reported", get(report_types::most_reported_types))
        .route("/by-state", get(report_types::reports_by_state))
        .route(
            "/{id}",
            get(report_types::get_report_type)
                .patch(report_types::update_report_type)
                .delete(report_types::delete_report_type),
        )
}
