//! Handlers for the `/reports` resource: citizen CRUD, admin lifecycle
//! transitions, and aggregate statistics.
//!
//! Create and update accept either `application/json` or
//! `multipart/form-data`; the multipart form may carry an `image` part with
//! photo evidence. Both shapes funnel into [`ReportForm`] so the rest of the
//! handler does not care how the body arrived.

use axum::extract::{FromRequest, Multipart, Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use civica_core::error::CoreError;
use civica_core::report_state::ReportState;
use civica_core::uploads::{is_allowed_image_mime, stored_filename, MAX_UPLOAD_BYTES};
use civica_core::validation::{validate_required_text, MAX_TEXT_LENGTH, MAX_TITLE_LENGTH};
use civica_db::models::image::{CreateImage, Image};
use civica_db::models::report::{
    CreateReport, MonthlyReportCount, ReportFilter, ReportResponse, UpdateReport,
};
use civica_db::repositories::{ImageRepo, ReportRepo, ReportTypeRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, ReportMessage};
use crate::state::AppState;
use crate::uploads::{save_evidence, UploadedImage};

// ---------------------------------------------------------------------------
// Body parsing
// ---------------------------------------------------------------------------

/// JSON body shape shared by create and update. Everything optional; create
/// enforces presence after parsing.
#[derive(Debug, Default, Deserialize)]
struct ReportBody {
    title: Option<String>,
    description: Option<String>,
    address: Option<String>,
    report_type_id: Option<String>,
}

/// Normalized form fields from either body encoding.
#[derive(Debug, Default)]
struct ReportForm {
    title: Option<String>,
    description: Option<String>,
    address: Option<String>,
    report_type_id: Option<String>,
    image: Option<UploadedImage>,
}

/// Parse the request body as JSON or multipart, depending on Content-Type.
/// Unknown multipart fields are ignored; a JSON body cannot carry an image.
async fn parse_report_form(state: &AppState, req: Request) -> Result<ReportForm, AppError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut form = ReportForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text_field(field).await?),
                "description" => form.description = Some(read_text_field(field).await?),
                "address" => form.address = Some(read_text_field(field).await?),
                "report_type_id" => form.report_type_id = Some(read_text_field(field).await?),
                "image" => {
                    let original_filename = field.file_name().unwrap_or("upload").to_string();
                    let mime = field.content_type().unwrap_or("").to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.body_text()))?
                        .to_vec();
                    form.image = Some(UploadedImage {
                        original_filename,
                        mime,
                        data,
                    });
                }
                // Unknown parts are skipped rather than rejected.
                _ => {}
            }
        }
        Ok(form)
    } else {
        let Json(body) = Json::<ReportBody>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(ReportForm {
            title: body.title,
            description: body.description,
            address: body.address,
            report_type_id: body.report_type_id,
            image: None,
        })
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Parse a UUID out of a form field, rejecting garbage with 400 rather than
/// letting it surface as a database error.
fn parse_uuid(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::BadRequest(format!("{field} must be a valid UUID")))
}

/// Validate the image part, write it to disk, and insert the `images` row.
async fn store_evidence(
    state: &AppState,
    user_id: Uuid,
    upload: UploadedImage,
) -> Result<Image, AppError> {
    if !is_allowed_image_mime(&upload.mime) {
        return Err(AppError::BadRequest(format!(
            "Unsupported image type '{}'. Only image/jpeg and image/png are accepted",
            upload.mime
        )));
    }
    if upload.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded image file is empty".into()));
    }
    // The router's body limit is the real gate; this guards direct callers.
    if upload.data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest("Uploaded image exceeds the size limit".into()));
    }

    let filename = stored_filename(user_id, &upload.original_filename);
    save_evidence(&state.config.upload_dir, &filename, &upload.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store uploaded image: {e}")))?;

    let image = ImageRepo::create(
        &state.pool,
        &CreateImage {
            title: filename,
            mime: upload.mime,
        },
    )
    .await?;
    Ok(image)
}

// ---------------------------------------------------------------------------
// Citizen endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/reports
///
/// Create a report owned by the caller. Accepts JSON or multipart; the
/// multipart form may attach one photo as the `image` part. New reports
/// always start in `OPENED` with no transition timestamp.
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    req: Request,
) -> AppResult<(StatusCode, Json<ReportMessage<ReportResponse>>)> {
    let form = parse_report_form(&state, req).await?;

    let title = form.title.unwrap_or_default();
    let description = form.description.unwrap_or_default();
    let address = form.address.unwrap_or_default();
    validate_required_text("title", &title, MAX_TITLE_LENGTH)
        .and_then(|()| validate_required_text("description", &description, MAX_TEXT_LENGTH))
        .and_then(|()| validate_required_text("address", &address, MAX_TEXT_LENGTH))
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let type_id = form
        .report_type_id
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("report_type_id is required".into()))
        .and_then(|raw| parse_uuid("report_type_id", raw))?;

    // The referenced type must exist and be live.
    ReportTypeRepo::find_by_id(&state.pool, type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ReportType",
            id: type_id,
        }))?;

    let image_id = match form.image {
        Some(upload) => Some(store_evidence(&state, auth.user_id, upload).await?.image_id),
        None => None,
    };

    let report = ReportRepo::create(
        &state.pool,
        auth.user_id,
        image_id,
        &CreateReport {
            title,
            description,
            address,
            report_type_id: type_id,
        },
    )
    .await?;

    let with_type = ReportRepo::find_with_type(&state.pool, report.report_id)
        .await?
        .ok_or_else(|| AppError::InternalError("Created report vanished before read-back".into()))?;

    tracing::info!(report_id = %report.report_id, user_id = %auth.user_id, "Report created");

    Ok((
        StatusCode::CREATED,
        Json(ReportMessage {
            report: ReportResponse::from(with_type),
            message: "Report created successfully",
        }),
    ))
}

/// GET /api/v1/reports/mine
///
/// The caller's own non-deleted reports, newest first.
pub async fn my_reports(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReportResponse>>>> {
    let rows = ReportRepo::list_by_author(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(ReportResponse::from).collect(),
    }))
}

/// GET /api/v1/reports/{id}
///
/// A single report, visible to its owner and to admins. Anyone else gets
/// the same 404 a missing report would produce.
pub async fn get_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<ReportResponse>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        })
    };

    let row = ReportRepo::find_with_type(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    if row.user_id != auth.user_id && !auth.is_admin() {
        return Err(not_found());
    }

    Ok(Json(DataResponse {
        data: ReportResponse::from(row),
    }))
}

/// PATCH /api/v1/reports/{id}
///
/// Owner-scoped partial update of the report's content fields. The state
/// machine is not reachable from here. A report owned by someone else is
/// indistinguishable from a missing one (404).
pub async fn update_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    req: Request,
) -> AppResult<Json<ReportMessage<ReportResponse>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        })
    };

    // Ownership probe before any file is written, so a stranger's PATCH
    // cannot leave orphaned uploads behind.
    let existing = ReportRepo::find_with_type(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    if existing.user_id != auth.user_id {
        return Err(not_found());
    }

    let form = parse_report_form(&state, req).await?;

    if let Some(ref title) = form.title {
        validate_required_text("title", title, MAX_TITLE_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(ref description) = form.description {
        validate_required_text("description", description, MAX_TEXT_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(ref address) = form.address {
        validate_required_text("address", address, MAX_TEXT_LENGTH)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let report_type_id = match form.report_type_id.as_deref() {
        Some(raw) => {
            let type_id = parse_uuid("report_type_id", raw)?;
            ReportTypeRepo::find_by_id(&state.pool, type_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "ReportType",
                    id: type_id,
                }))?;
            Some(type_id)
        }
        None => None,
    };

    let image_id = match form.image {
        Some(upload) => {
            if existing.image_id.is_some() {
                // The previous images row is not reclaimed when evidence is
                // replaced; the report simply points at the new one.
                tracing::warn!(report_id = %id, "Replacing report evidence, previous image row is orphaned");
            }
            Some(store_evidence(&state, auth.user_id, upload).await?.image_id)
        }
        None => None,
    };

    let updated = ReportRepo::update_owned(
        &state.pool,
        id,
        auth.user_id,
        &UpdateReport {
            title: form.title,
            description: form.description,
            address: form.address,
            report_type_id,
            image_id,
        },
    )
    .await?
    .ok_or_else(not_found)?;

    let with_type = ReportRepo::find_with_type(&state.pool, updated.report_id)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(report_id = %id, user_id = %auth.user_id, "Report updated");

    Ok(Json(ReportMessage {
        report: ReportResponse::from(with_type),
        message: "Report updated successfully",
    }))
}

/// DELETE /api/v1/reports/{id}
///
/// Owner-scoped soft delete. Zero affected rows (missing, already deleted,
/// or not yours) comes back as 404.
pub async fn delete_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let deleted = ReportRepo::soft_delete_owned(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }));
    }

    tracing::info!(report_id = %id, user_id = %auth.user_id, "Report deleted");

    Ok(Json(serde_json::json!({
        "message": "Report deleted successfully"
    })))
}

// ---------------------------------------------------------------------------
// Admin listing and statistics
// ---------------------------------------------------------------------------

/// Query parameters for the admin report listing.
#[derive(Debug, Default, Deserialize)]
pub struct ReportListParams {
    /// Case-insensitive substring over title and description.
    pub q: Option<String>,
    /// Exact lifecycle state, validated against the closed enumeration.
    pub state: Option<String>,
    /// Exact report type id.
    pub type_id: Option<Uuid>,
}

/// GET /api/v1/reports
///
/// Admin listing of all non-deleted reports, filterable by free text,
/// state, and type. An unknown `state` value is a 400, not an empty list.
pub async fn list_reports(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<DataResponse<Vec<ReportResponse>>>> {
    let state_filter = match params.state.as_deref() {
        Some(raw) => Some(
            ReportState::parse(raw)
                .map_err(AppError::BadRequest)?
                .as_str()
                .to_string(),
        ),
        None => None,
    };

    let rows = ReportRepo::list(
        &state.pool,
        &ReportFilter {
            query: params.q,
            state: state_filter,
            type_id: params.type_id,
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: rows.into_iter().map(ReportResponse::from).collect(),
    }))
}

/// GET /api/v1/reports/opened
///
/// Admin shortcut for the unattended queue: everything still in `OPENED`.
pub async fn list_opened_reports(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ReportResponse>>>> {
    let rows = ReportRepo::list(
        &state.pool,
        &ReportFilter {
            state: Some(ReportState::Opened.as_str().to_string()),
            ..ReportFilter::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: rows.into_iter().map(ReportResponse::from).collect(),
    }))
}

/// GET /api/v1/reports/by-month
///
/// Reports created per calendar month, chronological.
pub async fn reports_by_month(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<MonthlyReportCount>>>> {
    let rows = ReportRepo::count_by_month(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/reports/by-state-and-month
///
/// Reports grouped by the month of their last state change, then by state,
/// reshaped into `{ "<month>-<year>": { "<STATE>": count, ... }, ... }`.
/// Reports that never transitioned carry no timestamp and are absent.
pub async fn reports_by_state_and_month(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Map<String, Value>>>> {
    let rows = ReportRepo::count_by_state_and_month(&state.pool).await?;

    let mut buckets: Map<String, Value> = Map::new();
    for row in rows {
        let key = format!("{}-{}", row.month, row.year);
        let bucket = buckets
            .entry(key)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(counts) = bucket {
            counts.insert(row.state, Value::from(row.reports));
        }
    }

    Ok(Json(DataResponse { data: buckets }))
}

// ---------------------------------------------------------------------------
// Admin lifecycle transitions
// ---------------------------------------------------------------------------

/// Apply a state transition and return the refreshed report. Any target state
/// may be set from any current state; the timestamp is stamped either way.
async fn transition_report(
    state: &AppState,
    id: Uuid,
    target: ReportState,
) -> AppResult<Json<ReportMessage<ReportResponse>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        })
    };

    ReportRepo::set_state(&state.pool, id, target.as_str())
        .await?
        .ok_or_else(not_found)?;

    let with_type = ReportRepo::find_with_type(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(report_id = %id, state = %target, "Report state changed");

    Ok(Json(ReportMessage {
        report: ReportResponse::from(with_type),
        message: "Report state updated successfully",
    }))
}

/// PATCH /api/v1/reports/{id}/opened
pub async fn open_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportMessage<ReportResponse>>> {
    transition_report(&state, id, ReportState::Opened).await
}

/// PATCH /api/v1/reports/{id}/in-progress
pub async fn start_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportMessage<ReportResponse>>> {
    transition_report(&state, id, ReportState::InProgress).await
}

/// PATCH /api/v1/reports/{id}/solved
pub async fn solve_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportMessage<ReportResponse>>> {
    transition_report(&state, id, ReportState::Solved).await
}

/// PATCH /api/v1/reports/{id}/closed
pub async fn close_report(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ReportMessage<ReportResponse>>> {
    transition_report(&state, id, ReportState::Closed).await
}
