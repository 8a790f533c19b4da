//! Handlers for the `/auth` resource (sign-up, sign-in, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use civica_core::error::CoreError;
use civica_core::roles::ROLE_USER;
use civica_core::validation::{validate_email, validate_password_strength, validate_required_text};
use civica_db::models::user::{CreateUser, UserResponse};
use civica_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum length of name-ish sign-up fields.
const MAX_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/sign-up`.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub names: String,
    pub surnames: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/sign-in`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response returned by sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Response body for `POST /auth/sign-up`.
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user: UserResponse,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/sign-up
///
/// Register a new citizen account with the `user` role.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(input): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SignUpResponse>)> {
    // 1. Boundary validation, before any query runs.
    validate_required_text("username", &input.username, MAX_NAME_LENGTH)
        .and_then(|()| validate_required_text("names", &input.names, MAX_NAME_LENGTH))
        .and_then(|()| validate_required_text("surnames", &input.surnames, MAX_NAME_LENGTH))
        .and_then(|()| validate_email(&input.email))
        .and_then(|()| validate_password_strength(&input.password))
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Uniqueness checks (the uq_users_* constraints are the backstop).
    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    // 3. Hash the password and create the account.
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            names: input.names,
            surnames: input.surnames,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    // 4. Grant the citizen role.
    let role = RoleRepo::find_by_name(&state.pool, ROLE_USER)
        .await?
        .ok_or_else(|| AppError::InternalError("The 'user' role is not seeded".into()))?;
    RoleRepo::assign_to_user(&state.pool, user.user_id, role.id).await?;

    tracing::info!(user_id = %user.user_id, username = %user.username, "User registered");

    let response = SignUpResponse {
        user: UserResponse::from_user(user, vec![ROLE_USER.to_string()]),
        message: "Account created successfully",
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/sign-in
///
/// Authenticate with username + password. Returns a bearer access token.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInRequest>,
) -> AppResult<Json<AuthResponse>> {
    // The error message never reveals whether the username or the password
    // was wrong.
    let invalid_credentials =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid_credentials());
    }

    let roles = RoleRepo::names_for_user(&state.pool, user.user_id).await?;

    let access_token = generate_access_token(user.user_id, &roles, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.user_id, "User signed in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            roles,
        },
    }))
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user's profile.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let roles = RoleRepo::names_for_user(&state.pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: UserResponse::from_user(user, roles),
    }))
}
