//! HTTP-level integration tests for registration, sign-in, and the profile
//! endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

use civica_db::repositories::UserRepo;

fn sign_up_body(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "names": "Maria",
        "surnames": "Garcia",
        "email": format!("{username}@test.com"),
        "password": TEST_PASSWORD,
    })
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with the public user shape and the
/// citizen role. The password hash never appears in the response.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/sign-up", sign_up_body("vecina1")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "vecina1");
    assert_eq!(json["user"]["email"], "vecina1@test.com");
    assert_eq!(json["user"]["roles"], serde_json::json!(["user"]));
    assert!(json["user"]["user_id"].is_string());
    assert!(
        json["user"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );
    assert_eq!(json["message"], "Account created successfully");
}

/// A taken username is rejected with 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = post_json(app.clone(), "/api/v1/auth/sign-up", sign_up_body("dup")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut body = sign_up_body("dup");
    body["email"] = serde_json::json!("other@test.com");
    let second = post_json(app, "/api/v1/auth/sign-up", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// A registered email is rejected with 409 even under a new username.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = post_json(app.clone(), "/api/v1/auth/sign-up", sign_up_body("emaildup")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let mut body = sign_up_body("someoneelse");
    body["email"] = serde_json::json!("emaildup@test.com");
    let second = post_json(app, "/api/v1/auth/sign-up", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

/// Weak passwords fail validation with 400 before any row is written.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    for weak in ["short1A", "nouppercase1", "NOLOWERCASE1", "NoDigitsHere"] {
        let mut body = sign_up_body("weakpw");
        body["password"] = serde_json::json!(weak);
        let response = post_json(app.clone(), "/api/v1/auth/sign-up", body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "password '{weak}' should be rejected"
        );
    }

    let user = UserRepo::find_by_username(&pool, "weakpw")
        .await
        .expect("lookup should succeed");
    assert!(user.is_none(), "no account may exist after failed sign-up");
}

/// Malformed email addresses are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = sign_up_body("bademail");
    body["email"] = serde_json::json!("not-an-email");
    let response = post_json(app, "/api/v1/auth/sign-up", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Empty required fields are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_up_empty_names(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = sign_up_body("noname");
    body["names"] = serde_json::json!("   ");
    let response = post_json(app, "/api/v1/auth/sign-up", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

/// Successful sign-in returns a bearer token and public user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_in_success(pool: PgPool) {
    let user = common::create_user_with_role(&pool, "signin", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "signin", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["user_id"], user.user_id.to_string());
    assert_eq!(json["user"]["roles"], serde_json::json!(["user"]));
}

/// A wrong password yields 401 with the same message a missing account gives.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_in_wrong_password(pool: PgPool) {
    common::create_user_with_role(&pool, "wrongpw", "user").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "Incorrect.1" });
    let wrong = post_json(app.clone(), "/api/v1/auth/sign-in", body).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_json = body_json(wrong).await;

    let body = serde_json::json!({ "username": "ghost", "password": "Incorrect.1" });
    let missing = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let missing_json = body_json(missing).await;

    assert_eq!(
        wrong_json["error"], missing_json["error"],
        "the error must not reveal whether the account exists"
    );
}

/// A soft-deleted user can no longer sign in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_sign_in_deleted_user(pool: PgPool) {
    let user = common::create_user_with_role(&pool, "gone", "user").await;
    UserRepo::soft_delete(&pool, user.user_id)
        .await
        .expect("soft delete should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "gone", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/sign-in", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// /auth/me returns the authenticated user's profile with resolved roles.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let user = common::create_user_with_role(&pool, "selfie", "admin").await;
    let app = common::build_test_app(pool);

    let token = common::login(app.clone(), "selfie").await;
    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user.user_id.to_string());
    assert_eq!(json["data"]["username"], "selfie");
    assert_eq!(json["data"]["roles"], serde_json::json!(["admin"]));
}

/// Requests without a token are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A garbage token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_rejects_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
