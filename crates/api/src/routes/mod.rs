pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/logout                                 logout (session)
/// /auth/password                               change password (session)
///
/// /public/projects                             published projects
/// /public/projects/{slug}                      project with gallery
/// /public/projects/{slug}/gallery/{index}      focused gallery photo
/// /public/categories                           all categories
/// /public/tags                                 all tags
///
/// /admin/projects                              list, create
/// /admin/projects/order                        apply reorder batch (POST)
/// /admin/projects/{id}                         get, update, delete
/// /admin/projects/{id}/categories              replace categories (PUT)
/// /admin/projects/{id}/tags                    replace tags (PUT)
/// /admin/projects/{id}/photos                  list, upload (multipart)
/// /admin/projects/{id}/photos/url              add by external URL (POST)
/// /admin/projects/{id}/photos/order            apply reorder batch (POST)
/// /admin/projects/{id}/photos/{photo_id}       update caption, delete
/// /admin/categories                            list, create
/// /admin/categories/{id}                       rename, delete
/// /admin/tags                                  list, create
/// /admin/tags/ensure                           create-or-get by name (POST)
/// /admin/tags/{id}                             rename, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/public", public::router())
        .nest("/admin", admin::router())
}
