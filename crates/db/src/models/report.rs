//! Report entity model, DTOs, and aggregate row shapes.

use civica_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A report row from the `reports` table.
///
/// `state` is stored as the SCREAMING_SNAKE wire string and constrained by a
/// CHECK; parse with `civica_core::report_state::ReportState` at the boundary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub report_id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub state: String,
    pub report_type_id: Uuid,
    pub image_id: Option<Uuid>,
    pub user_id: Uuid,
    /// Stamped only by admin state transitions; NULL on freshly created rows.
    pub state_change_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// A report row joined with its type name, as returned by list/detail queries.
#[derive(Debug, Clone, FromRow)]
pub struct ReportWithType {
    pub report_id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub state: String,
    pub report_type_id: Uuid,
    pub type_name: String,
    pub image_id: Option<Uuid>,
    pub user_id: Uuid,
    pub state_change_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// External representation of a report: the joined row plus a ready-to-use
/// image URL (the image id itself is internal plumbing).
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub report_id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub state: String,
    pub report_type_id: Uuid,
    pub type_name: String,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub state_change_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ReportWithType> for ReportResponse {
    fn from(row: ReportWithType) -> Self {
        ReportResponse {
            report_id: row.report_id,
            title: row.title,
            description: row.description,
            address: row.address,
            state: row.state,
            report_type_id: row.report_type_id,
            type_name: row.type_name,
            user_id: row.user_id,
            image_url: row.image_id.map(|id| format!("/api/v1/images/{id}")),
            state_change_at: row.state_change_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for creating a new report. The owner and optional image are supplied
/// separately by the handler; state is always forced to `OPENED`.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub address: String,
    pub report_type_id: Uuid,
}

/// DTO for an owner-scoped partial update. All fields optional; state and
/// `state_change_at` are never touched by this path.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReport {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub report_type_id: Option<Uuid>,
    #[serde(skip)]
    pub image_id: Option<Uuid>,
}

/// Filter set for the admin report listing. Absent fields mean "no constraint".
#[derive(Debug, Default)]
pub struct ReportFilter {
    /// Case-insensitive substring matched against title OR description.
    pub query: Option<String>,
    /// Exact state, already validated against the closed enumeration.
    pub state: Option<String>,
    /// Exact report type id.
    pub type_id: Option<Uuid>,
}

/// One row of the reports-per-month aggregate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyReportCount {
    pub reports: i64,
    pub year: i32,
    pub month: i32,
}

/// One row of the reports-per-state aggregate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StateReportCount {
    pub state: String,
    pub reports: i64,
}

/// One row of the reports-per-(month, state) aggregate, keyed on the month of
/// the last state change.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyStateCount {
    pub reports: i64,
    pub year: i32,
    pub month: i32,
    pub state: String,
}
