pub mod auth;
pub mod health;
pub mod images;
pub mod report_types;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-up                      register (public)
/// /auth/sign-in                      login (public)
/// /auth/me                           current profile (requires auth)
///
/// /reports                           create (auth), list + filters (admin)
/// /reports/mine                      caller's reports (auth)
/// /reports/opened                    unattended queue (admin)
/// /reports/by-month                  creation stats (admin)
/// /reports/by-state-and-month        transition stats (admin)
/// /reports/{id}                      get (owner/admin), update, delete (owner)
/// /reports/{id}/opened               transition (admin)
/// /reports/{id}/in-progress          transition (admin)
/// /reports/{id}/solved               transition (admin)
/// /reports/{id}/closed               transition (admin)
///
/// /report-types                      list (auth), create (admin)
/// /report-types/most-reported        top 5 by report count (admin)
/// /report-types/by-state             report counts per state (admin)
/// /report-types/{id}                 get, update, delete (admin)
///
/// /images/{id}                       stream evidence file (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, login, and profile.
        .nest("/auth", auth::router())
        // Citizen reports: CRUD, lifecycle, statistics.
        .nest("/reports", reports::router())
        // Report taxonomy management.
        .nest("/report-types", report_types::router())
        // Stored photo evidence.
        .nest("/images", images::router())
}
