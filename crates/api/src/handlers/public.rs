//! Read-only handlers for the public site.
//!
//! Only published projects are visible. Drafts answer 404 exactly like
//! missing projects.

use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gallery::GalleryNavigator;
use folio_core::ordering::OrderedCollection;
use folio_db::models::category::Category;
use folio_db::models::photo::Photo;
use folio_db::models::project::{Project, ProjectListParams, ProjectWithRelations};
use folio_db::models::tag::Tag;
use folio_db::repositories::{CategoryRepo, PhotoRepo, ProjectRepo, TagRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::project::with_relations;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the gallery endpoint.
#[derive(Debug, Deserialize)]
pub struct GalleryParams {
    /// Wrap around at either end (default: `true`).
    #[serde(rename = "loop")]
    pub looping: Option<bool>,
}

/// One focused gallery position, with the neighbours the lightbox arrows
/// lead to.
#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub index: usize,
    pub total: usize,
    pub looping: bool,
    pub photo: Photo,
    /// `None` when the arrow is disabled (no looping, at an end).
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

async fn find_published(pool: &PgPool, slug: &str) -> AppResult<Project> {
    ProjectRepo::find_published_by_slug(pool, slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Project",
                key: slug.to_string(),
            })
        })
}

/// GET /api/v1/public/projects
///
/// Published projects in display order. `?category=<slug>` and
/// `?tag_id=<id>` narrow the list.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_published(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/public/projects/{slug}
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<ProjectWithRelations>>> {
    let project = find_published(&state.pool, &slug).await?;
    let data = with_relations(&state.pool, project).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/public/projects/{slug}/gallery/{index}
///
/// Open the gallery at `index` (0-based, main photo first).
pub async fn gallery_item(
    State(state): State<AppState>,
    Path((slug, index)): Path<(String, usize)>,
    Query(params): Query<GalleryParams>,
) -> AppResult<Json<DataResponse<GalleryView>>> {
    let project = find_published(&state.pool, &slug).await?;
    let photos =
        OrderedCollection::from_rows(PhotoRepo::list_by_project(&state.pool, project.id).await?)
            .into_items();

    let looping = params.looping.unwrap_or(true);
    let mut navigator = GalleryNavigator::with_looping(photos.len(), looping);
    if !navigator.open(index) {
        return Err(AppError::Core(CoreError::NotFoundByKey {
            entity: "Photo",
            key: format!("{slug}#{index}"),
        }));
    }

    let prev = navigator.peek_prev();
    let next = navigator.peek_next();
    let total = navigator.len();
    let photo = photos
        .into_iter()
        .nth(index)
        .ok_or_else(|| AppError::InternalError(format!("Gallery index {index} vanished")))?;

    Ok(Json(DataResponse {
        data: GalleryView {
            index,
            total,
            looping,
            photo,
            prev,
            next,
        },
    }))
}

/// GET /api/v1/public/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/public/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}
