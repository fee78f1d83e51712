//! HTTP-level integration tests for the products endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, put_json_auth, seed_user};
use sqlx::PgPool;
use uuid::Uuid;

fn widget_body(sku: &str) -> serde_json::Value {
    serde_json::json!({
        "sku": sku,
        "name": "Widget",
        "category": "widgets",
        "unit_price": 9.99,
        "reorder_point": 10,
        "optimal_stock": 50
    })
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_created_product(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/products", &token, widget_body("WIDGET-1")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["sku"], "WIDGET-1");
    assert_eq!(json["data"]["reorder_point"], 10);
    assert_eq!(json["data"]["optimal_stock"], 50);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_duplicate_sku_conflicts(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app.clone(), "/api/v1/products", &token, widget_body("DUP-1")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/products", &token, widget_body("DUP-1")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_as_viewer_is_forbidden(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "viewer@test.com", "viewer").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/v1/products", &token, widget_body("NOPE-1")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_negative_price(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool);

    let mut body = widget_body("NEG-1");
    body["unit_price"] = serde_json::json!(-1.0);
    let response = post_json_auth(app, "/api/v1/products", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_product_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/products/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_requires_two_characters(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/products/search?q=w").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_matches_by_name(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/api/v1/products", &token, widget_body("WIDGET-1")).await;

    let response = get(app, "/api/v1/products/search?q=wid").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["sku"], "WIDGET-1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn categories_groups_and_counts(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/api/v1/products", &token, widget_body("W-1")).await;
    post_json_auth(app.clone(), "/api/v1/products", &token, widget_body("W-2")).await;

    let response = get(app, "/api/v1/products/categories").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["category"], "widgets");
    assert_eq!(json["data"][0]["count"], 2);
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_applies_partial_changes(pool: PgPool) {
    let (_id, token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app.clone(), "/api/v1/products", &token, widget_body("UPD-1")).await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let patch = serde_json::json!({ "name": "Widget v2" });
    let response = put_json_auth(app, &format!("/api/v1/products/{id}"), &token, patch).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Widget v2");
    // Untouched fields survive.
    assert_eq!(json["data"]["sku"], "UPD-1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_requires_admin(pool: PgPool) {
    let (_mgr, mgr_token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let (_admin, admin_token) = seed_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app.clone(), "/api/v1/products", &mgr_token, widget_body("DEL-1")).await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/products/{id}");

    let response = delete_auth(app.clone(), &uri, &mgr_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app, &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// A product referenced by inventory cannot be deleted.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_with_inventory_conflicts(pool: PgPool) {
    let (_mgr, mgr_token) = seed_user(&pool, "mgr@test.com", "manager").await;
    let (_admin, admin_token) = seed_user(&pool, "admin@test.com", "admin").await;
    let app = common::build_test_app(pool.clone());

    let response =
        post_json_auth(app.clone(), "/api/v1/products", &mgr_token, widget_body("HELD-1")).await;
    let created = body_json(response).await;
    let product_id = created["data"]["id"].as_str().unwrap().to_string();

    let warehouse_id: uuid::Uuid =
        sqlx::query_scalar("INSERT INTO warehouses (name) VALUES ('Main') RETURNING id")
            .fetch_one(&pool)
            .await
            .expect("insert should succeed");
    sqlx::query("INSERT INTO inventory (product_id, warehouse_id, quantity) VALUES ($1::uuid, $2, 5)")
        .bind(&product_id)
        .bind(warehouse_id)
        .execute(&pool)
        .await
        .expect("insert should succeed");

    let response = delete_auth(app, &format!("/api/v1/products/{product_id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
