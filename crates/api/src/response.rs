//! Shared response envelope types for API handlers.
//!
//! List/read endpoints use a `{ "data": ... }` envelope; mutation endpoints
//! return the affected entity plus a human-readable message, matching the
//! platform's established response shapes.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope for reads and listings.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Mutation envelope: `{ "report": ..., "message": ... }`.
#[derive(Debug, Serialize)]
pub struct ReportMessage<T: Serialize> {
    pub report: T,
    pub message: &'static str,
}

/// Mutation envelope: `{ "reportType": ..., "message": ... }`.
#[derive(Debug, Serialize)]
pub struct ReportTypeMessage<T: Serialize> {
    #[serde(rename = "reportType")]
    pub report_type: T,
    pub message: &'static str,
}
