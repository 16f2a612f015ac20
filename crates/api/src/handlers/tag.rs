//! Admin handlers for the `/tags` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::catalog::validate_name;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::tag::{Tag, TagInput};
use folio_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

fn clean_name(input: &TagInput) -> Result<&str, CoreError> {
    let name = input.name.trim();
    validate_name(name)?;
    Ok(name)
}

/// GET /api/v1/admin/tags
pub async fn list(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/admin/tags
///
/// A name already in use (case-insensitively) is a conflict.
pub async fn create(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(input): Json<TagInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    let name = clean_name(&input)?;
    if TagRepo::name_exists(&state.pool, name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A tag named '{name}' already exists"
        ))));
    }
    let tag = TagRepo::create(&state.pool, name).await?;
    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// POST /api/v1/admin/tags/ensure
///
/// Return the tag with this exact name, creating it if needed. Backs the
/// editor's "create while typing" picker.
pub async fn ensure(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(input): Json<TagInput>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let name = clean_name(&input)?;
    let tag = TagRepo::create_or_get(&state.pool, name).await?;
    Ok(Json(DataResponse { data: tag }))
}

/// PUT /api/v1/admin/tags/{id}
pub async fn update(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
    Json(input): Json<TagInput>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let name = clean_name(&input)?;
    if TagRepo::name_exists(&state.pool, name, Some(id)).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A tag named '{name}' already exists"
        ))));
    }
    let tag = TagRepo::update(&state.pool, id, name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id }))?;
    tracing::info!(tag_id = id, name = %tag.name, "Tag renamed");
    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/admin/tags/{id}
pub async fn delete(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if TagRepo::delete(&state.pool, id).await? {
        tracing::info!(tag_id = id, "Tag deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }))
    }
}
