//! Report type (taxonomy) entity model and DTOs.

use civica_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A report type row from the `report_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportType {
    pub report_type_id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new report type.
#[derive(Debug, Deserialize)]
pub struct CreateReportType {
    pub name: String,
    pub description: String,
}

/// DTO for updating an existing report type. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateReportType {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// One row of the "most reported types" aggregate: a type name and how many
/// reports reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TypeReportCount {
    pub type_name: String,
    pub reports: i64,
}
