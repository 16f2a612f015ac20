//! Route definitions for the `/admin` surface. Every handler requires an
//! [`AdminSession`](crate::middleware::auth::AdminSession).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{category, photo, project, tag};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET, POST          /projects
/// POST               /projects/order
/// GET, PUT, DELETE   /projects/{id}
/// PUT                /projects/{id}/categories
/// PUT                /projects/{id}/tags
/// GET, POST          /projects/{id}/photos
/// POST               /projects/{id}/photos/url
/// POST               /projects/{id}/photos/order
/// PUT, DELETE        /projects/{id}/photos/{photo_id}
/// GET, POST          /categories
/// PUT, DELETE        /categories/{id}
/// GET, POST          /tags
/// POST               /tags/ensure
/// PUT, DELETE        /tags/{id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(project::list).post(project::create))
        .route("/projects/order", post(project::reorder))
        .route(
            "/projects/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/projects/{id}/categories", put(project::set_categories))
        .route("/projects/{id}/tags", put(project::set_tags))
        .route("/projects/{id}/photos", get(photo::list).post(photo::upload))
        .route("/projects/{id}/photos/url", post(photo::create_from_url))
        .route("/projects/{id}/photos/order", post(photo::reorder))
        .route(
            "/projects/{id}/photos/{photo_id}",
            put(photo::update).delete(photo::delete),
        )
        .route("/categories", get(category::list).post(category::create))
        .route(
            "/categories/{id}",
            put(category::update).delete(category::delete),
        )
        .route("/tags", get(tag::list).post(tag::create))
        .route("/tags/ensure", post(tag::ensure))
        .route("/tags/{id}", put(tag::update).delete(tag::delete))
}
