//! Handlers for the `/report-types` resource (the report taxonomy).
//!
//! Catalog management is admin-only; the listing is readable by any
//! authenticated user so the report form can be populated.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use civica_core::error::CoreError;
use civica_core::validation::{validate_required_text, MAX_TEXT_LENGTH, MAX_TITLE_LENGTH};
use civica_db::models::report::StateReportCount;
use civica_db::models::report_type::{
    CreateReportType, ReportType, TypeReportCount, UpdateReportType,
};
use civica_db::repositories::{ReportRepo, ReportTypeRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::{DataResponse, ReportTypeMessage};
use crate::state::AppState;

/// POST /api/v1/report-types
///
/// Add a category to the taxonomy. Names are unique among live types.
pub async fn create_report_type(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateReportType>,
) -> AppResult<(StatusCode, Json<ReportTypeMessage<ReportType>>)> {
    validate_required_text("name", &input.name, MAX_TITLE_LENGTH)
        .and_then(|()| validate_required_text("description", &input.description, MAX_TEXT_LENGTH))
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if ReportTypeRepo::find_by_name(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A report type with that name already exists".into(),
        )));
    }

    let report_type = ReportTypeRepo::create(&state.pool, &input).await?;

    tracing::info!(report_type_id = %report_type.report_type_id, name = %report_type.name, "Report type created");

    Ok((
        StatusCode::CREATED,
        Json(ReportTypeMessage {
            report_type,
            message: "Report type created successfully",
        }),
    ))
}

/// GET /api/v1/report-types
///
/// All live report types, ordered by name. Any authenticated user.
pub async fn list_report_types(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReportType>>>> {
    let types = ReportTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// GET /api/v1/report-types/{id}
pub async fn get_report_type(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<ReportType>>> {
    let report_type = ReportTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ReportType",
            id,
        }))?;
    Ok(Json(DataResponse { data: report_type }))
}

/// PATCH /api/v1/report-types/{id}
///
/// Partial update of name and/or description.
pub async fn update_report_type(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateReportType>,
) -> AppResult<Json<ReportTypeMessage<ReportType>>> {
    if let Some(ref name) = input.name {
        validate_required_text("name", name, MAX_TITLE_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(ref description) = input.description {
        validate_required_text("description", description, MAX_TEXT_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let report_type = ReportTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ReportType",
            id,
        }))?;

    tracing::info!(report_type_id = %id, "Report type updated");

    Ok(Json(ReportTypeMessage {
        report_type,
        message: "Report type updated successfully",
    }))
}

/// DELETE /api/v1/report-types/{id}
///
/// Soft-delete a type. Refused with 409 while any report (including
/// soft-deleted ones) still references it.
pub async fn delete_report_type(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportTypeMessage<ReportType>>> {
    let report_type = ReportTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ReportType",
            id,
        }))?;

    let references = ReportTypeRepo::count_reports(&state.pool, id).await?;
    if references > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete a report type that has associated reports".into(),
        )));
    }

    let deleted = ReportTypeRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ReportType",
            id,
        }));
    }

    tracing::info!(report_type_id = %id, name = %report_type.name, "Report type deleted");

    Ok(Json(ReportTypeMessage {
        report_type,
        message: "Report type deleted successfully",
    }))
}

/// GET /api/v1/report-types/most-reported
///
/// The five type names with the most associated reports, descending.
pub async fn most_reported_types(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TypeReportCount>>>> {
    let rows = ReportTypeRepo::most_reported(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/report-types/by-state
///
/// Live report counts grouped by current lifecycle state.
pub async fn reports_by_state(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StateReportCount>>>> {
    let rows = ReportRepo::count_by_state(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}
