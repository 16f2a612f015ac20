//! Admin handlers for the `/projects` resource.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::catalog::{slugify, validate_image_url, validate_title, validate_year};
use folio_core::error::CoreError;
use folio_core::ordering::{next_display_order, OrderOp, OrderedCollection};
use folio_core::types::DbId;
use folio_db::models::category::Category;
use folio_db::models::project::{
    CreateProject, Project, ProjectWithRelations, SetRelationsRequest, UpdateProject,
};
use folio_db::models::tag::Tag;
use folio_db::repositories::{CategoryRepo, PhotoRepo, ProjectRepo, TagRepo};
use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::photo::remove_stored_files;
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for the `/order` endpoints: the reorder intents recorded in
/// one editing session, replayed in order before a single save.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ops: Vec<OrderOp>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_project(pool: &PgPool, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// Attach gallery and classification to a project.
pub(crate) async fn with_relations(
    pool: &PgPool,
    project: Project,
) -> AppResult<ProjectWithRelations> {
    let photos = PhotoRepo::list_by_project(pool, project.id).await?;
    let categories = CategoryRepo::list_for_project(pool, project.id).await?;
    let tags = TagRepo::list_for_project(pool, project.id).await?;
    Ok(ProjectWithRelations {
        photos: OrderedCollection::from_rows(photos).into_items(),
        project,
        categories,
        tags,
    })
}

fn validate_fields(
    title: Option<&str>,
    completed_year: Option<i32>,
    cover_url: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(year) = completed_year {
        validate_year(year)?;
    }
    if let Some(url) = cover_url {
        validate_image_url(url)?;
    }
    Ok(())
}

/// Normalise a user-supplied slug, rejecting one that is empty after
/// normalisation or already taken by another project.
async fn explicit_slug(pool: &PgPool, raw: &str, exclude_id: Option<DbId>) -> AppResult<String> {
    let slug = slugify(raw);
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "slug must contain at least one letter or digit".into(),
        )));
    }
    if ProjectRepo::slug_exists(pool, &slug, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A project with slug '{slug}' already exists"
        ))));
    }
    Ok(slug)
}

/// Derive a free slug from a title, appending `-2`, `-3`, ... on collision.
async fn derived_slug(pool: &PgPool, title: &str) -> AppResult<String> {
    let base = slugify(title);
    let base = if base.is_empty() {
        "project".to_string()
    } else {
        base
    };

    let mut candidate = base.clone();
    let mut suffix = 2;
    while ProjectRepo::slug_exists(pool, &candidate, None).await? {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    Ok(candidate)
}

/// Deduplicate requested relation ids.
fn unique_ids(ids: &[DbId]) -> Vec<DbId> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

fn ensure_all_exist(entity: &str, requested: &[DbId], found: i64) -> Result<(), CoreError> {
    if usize::try_from(found).ok() == Some(requested.len()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "One or more {entity} ids do not exist"
        )))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects
///
/// All projects, drafts included, in display order.
pub async fn list(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/admin/projects
///
/// New projects go to the end of the display order.
pub async fn create(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_fields(
        Some(&input.title),
        input.completed_year,
        input.cover_url.as_deref(),
    )?;

    let slug = match input.slug.as_deref() {
        Some(raw) => explicit_slug(&state.pool, raw, None).await?,
        None => derived_slug(&state.pool, &input.title).await?,
    };
    let display_order = next_display_order(ProjectRepo::max_display_order(&state.pool).await?);

    let project = ProjectRepo::create(&state.pool, &input, &slug, display_order).await?;
    tracing::info!(project_id = project.id, %slug, display_order, "Project created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectWithRelations>>> {
    let project = find_project(&state.pool, id).await?;
    let data = with_relations(&state.pool, project).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    validate_fields(
        input.title.as_deref(),
        input.completed_year,
        input.cover_url.as_deref(),
    )?;

    if let Some(raw) = input.slug.take() {
        input.slug = Some(explicit_slug(&state.pool, &raw, Some(id)).await?);
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(project_id = id, "Project updated");
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Photos and relation rows go with the project; their stored files are
/// removed afterwards.
pub async fn delete(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let photos = PhotoRepo::list_by_project(&state.pool, id).await?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    tracing::info!(project_id = id, photos = photos.len(), "Project deleted");

    let keys: Vec<&str> = photos.iter().filter_map(|p| p.storage_path.as_deref()).collect();
    remove_stored_files(&state, keys).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/projects/order
///
/// Replay a batch of move intents against the current order and save the
/// result. A batch naming an unknown project is rejected before anything
/// is applied.
pub async fn reorder(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let mut collection = OrderedCollection::from_rows(ProjectRepo::list(&state.pool).await?);
    collection.validate_ops(&input.ops)?;

    let changed = collection.apply_all(&input.ops);
    if collection.is_dirty() {
        ProjectRepo::save_order(&state.pool, &collection.save_plan()).await?;
        collection.mark_saved();
    }
    tracing::info!(ops = input.ops.len(), changed, "Project order saved");

    Ok(Json(DataResponse {
        data: collection.into_items(),
    }))
}

/// PUT /api/v1/admin/projects/{id}/categories
///
/// Replace the project's categories with exactly the given set.
pub async fn set_categories(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
    Json(input): Json<SetRelationsRequest>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    find_project(&state.pool, id).await?;

    let ids = unique_ids(&input.ids);
    let found = CategoryRepo::count_existing(&state.pool, &ids).await?;
    ensure_all_exist("category", &ids, found)?;

    ProjectRepo::set_categories(&state.pool, id, &ids).await?;
    let categories = CategoryRepo::list_for_project(&state.pool, id).await?;
    tracing::info!(project_id = id, count = categories.len(), "Project categories replaced");
    Ok(Json(DataResponse { data: categories }))
}

/// PUT /api/v1/admin/projects/{id}/tags
///
/// Replace the project's tags with exactly the given set.
pub async fn set_tags(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
    Json(input): Json<SetRelationsRequest>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    find_project(&state.pool, id).await?;

    let ids = unique_ids(&input.ids);
    let found = TagRepo::count_existing(&state.pool, &ids).await?;
    ensure_all_exist("tag", &ids, found)?;

    ProjectRepo::set_tags(&state.pool, id, &ids).await?;
    let tags = TagRepo::list_for_project(&state.pool, id).await?;
    tracing::info!(project_id = id, count = tags.len(), "Project tags replaced");
    Ok(Json(DataResponse { data: tags }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_ids_are_deduplicated_and_sorted() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(unique_ids(&[]).is_empty());
    }

    #[test]
    fn missing_relation_ids_are_a_validation_error() {
        assert!(ensure_all_exist("tag", &[1, 2], 2).is_ok());
        let err = ensure_all_exist("tag", &[1, 2], 1).unwrap_err();
        assert!(err.to_string().contains("tag ids"));
    }

    #[test]
    fn field_validation_skips_absent_fields() {
        assert!(validate_fields(None, None, None).is_ok());
        assert!(validate_fields(Some(""), None, None).is_err());
        assert!(validate_fields(None, Some(1700), None).is_err());
        assert!(validate_fields(None, None, Some("nope")).is_err());
    }
}
