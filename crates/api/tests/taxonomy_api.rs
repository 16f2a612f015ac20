//! HTTP-level tests for category and tag management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, login, post_json_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn category_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "  Жилые интерьеры " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["name"], "Жилые интерьеры");
    assert_eq!(created["slug"], "zhilye-interery");
    let id = created["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/categories/{id}"),
        &token,
        serde_json::json!({ "name": "Homes" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["slug"], "homes");

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/categories/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, "/api/v1/admin/categories", &token).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_category_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    post_json_auth(
        app.clone(),
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "Hotels" }),
    )
    .await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "hotels" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn renaming_to_own_name_is_allowed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "Retail" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/admin/categories/{id}"),
        &token,
        serde_json::json!({ "name": "Retail" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_category_name_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn tag_create_rename_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/tags",
        &token,
        serde_json::json!({ "name": "oak" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/tags/{id}"),
        &token,
        serde_json::json!({ "name": "white oak" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "white oak");

    let response = delete_auth(app.clone(), &format!("/api/v1/admin/tags/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/admin/tags/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_tag_is_conflict_but_ensure_reuses(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/tags",
        &token,
        serde_json::json!({ "name": "veneer" }),
    )
    .await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/tags",
        &token,
        serde_json::json!({ "name": "Veneer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        app,
        "/api/v1/admin/tags/ensure",
        &token,
        serde_json::json!({ "name": "veneer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);
}
