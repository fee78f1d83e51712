//! HTTP-level integration tests for registration, login, and profile access.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, seed_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Successful registration returns 201 with a token and the viewer role.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_viewer_and_signs_in(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "new@test.com",
        "password": "secret-enough",
        "full_name": "New User"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["user"]["email"], "new@test.com");
    assert_eq!(json["data"]["user"]["role"], "viewer");
    assert!(
        json["data"]["user"]["password_hash"].is_null(),
        "hash must never be serialized"
    );
}

/// A duplicate email returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    seed_user(&pool, "taken@test.com", "viewer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "taken@test.com", "password": "secret-enough" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// A too-short password returns 400 with a validation code.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "short@test.com", "password": "tiny" });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_roundtrip_succeeds(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "email": "login@test.com",
        "password": "secret-enough"
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "email": "login@test.com", "password": "secret-enough" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert!(json["data"]["expires_in"].is_number());

    // last_login was stamped.
    let last_login: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT last_login FROM users WHERE email = 'login@test.com'")
            .fetch_one(&pool)
            .await
            .expect("user should exist");
    assert!(last_login.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    seed_user(&pool, "victim@test.com", "viewer").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "victim@test.com", "password": "not-the-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever-pass" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A deactivated account cannot log in even with the right password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_deactivated_account_is_forbidden(pool: PgPool) {
    seed_user(&pool, "gone@test.com", "viewer").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE email = 'gone@test.com'")
        .execute(&pool)
        .await
        .expect("update should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "gone@test.com", "password": "integration-pass" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Profile and logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn me_returns_profile(pool: PgPool) {
    let (user_id, token) = seed_user(&pool, "profile@test.com", "manager").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id.to_string());
    assert_eq!(json["data"]["email"], "profile@test.com");
    assert_eq!(json["data"]["role"], "manager");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_without_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_acknowledges(pool: PgPool) {
    let (_user_id, token) = seed_user(&pool, "bye@test.com", "viewer").await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app, "/api/v1/auth/logout", &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
