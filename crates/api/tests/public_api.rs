//! HTTP-level tests for the public read-only surface and gallery navigation.

mod common;

use axum::http::StatusCode;
use common::{add_photo, body_json, create_project, get, ids, login, post_json_auth, put_json_auth};
use sqlx::PgPool;

async fn published_project(app: &axum::Router, token: &str, title: &str, photos: usize) -> (i64, String, Vec<i64>) {
    let project = create_project(
        app,
        token,
        serde_json::json!({ "title": title, "is_published": true }),
    )
    .await;
    let id = project["id"].as_i64().unwrap();
    let mut photo_ids = Vec::new();
    for n in 0..photos {
        photo_ids.push(add_photo(app, token, id, &format!("{id}-{n}")).await);
    }
    (id, project["slug"].as_str().unwrap().to_string(), photo_ids)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn drafts_are_hidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let (published, _, _) = published_project(&app, &token, "Public", 0).await;
    let draft = create_project(&app, &token, serde_json::json!({ "title": "Draft" })).await;

    let response = get(app.clone(), "/api/v1/public/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ids(&body_json(response).await["data"]), vec![published]);

    let slug = draft["slug"].as_str().unwrap();
    let response = get(app, &format!("/api/v1/public/projects/{slug}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_detail_lists_gallery_main_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let (id, slug, p) = published_project(&app, &token, "Kitchen", 3).await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/projects/{id}/photos/order"),
        &token,
        serde_json::json!({ "ops": [{ "op": "set_primary", "id": p[1] }] }),
    )
    .await;

    let response = get(app, &format!("/api/v1/public/projects/{slug}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Kitchen");
    assert_eq!(ids(&json["data"]["photos"]), vec![p[1], p[0], p[2]]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_filters_by_category(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let (office, _, _) = published_project(&app, &token, "Office", 0).await;
    published_project(&app, &token, "Home", 0).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/categories",
        &token,
        serde_json::json!({ "name": "Offices" }),
    )
    .await;
    let category_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/projects/{office}/categories"),
        &token,
        serde_json::json!({ "ids": [category_id] }),
    )
    .await;

    let response = get(app.clone(), "/api/v1/public/projects?category=offices").await;
    assert_eq!(ids(&body_json(response).await["data"]), vec![office]);

    let response = get(app, "/api/v1/public/categories").await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["name"], "Offices");
}

// ---------------------------------------------------------------------------
// Gallery navigation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_wraps_at_both_ends(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let (_, slug, p) = published_project(&app, &token, "Lobby", 4).await;

    let response = get(app.clone(), &format!("/api/v1/public/projects/{slug}/gallery/3")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["photo"]["id"], p[3]);
    assert_eq!(json["data"]["total"], 4);
    assert_eq!(json["data"]["next"], 0);
    assert_eq!(json["data"]["prev"], 2);

    let response = get(app, &format!("/api/v1/public/projects/{slug}/gallery/0")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["photo"]["id"], p[0]);
    assert_eq!(json["data"]["prev"], 3);
    assert_eq!(json["data"]["next"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_without_looping_stops_at_ends(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let (_, slug, _) = published_project(&app, &token, "Spa", 4).await;

    let response = get(
        app,
        &format!("/api/v1/public/projects/{slug}/gallery/3?loop=false"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["looping"], false);
    assert!(json["data"]["next"].is_null());
    assert_eq!(json["data"]["prev"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_index_out_of_range_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login(&app).await;
    let (_, slug, _) = published_project(&app, &token, "Empty", 0).await;

    let response = get(app, &format!("/api/v1/public/projects/{slug}/gallery/0")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
