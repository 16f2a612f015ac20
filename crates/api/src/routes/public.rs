//! Route definitions for the unauthenticated `/public` surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET /projects                          -> list_projects (?category, ?tag_id)
/// GET /projects/{slug}                   -> get_project
/// GET /projects/{slug}/gallery/{index}   -> gallery_item (?loop)
/// GET /categories                        -> list_categories
/// GET /tags                              -> list_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(public::list_projects))
        .route("/projects/{slug}", get(public::get_project))
        .route("/projects/{slug}/gallery/{index}", get(public::gallery_item))
        .route("/categories", get(public::list_categories))
        .route("/tags", get(public::list_tags))
}
