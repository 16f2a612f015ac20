//! Admin handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::catalog::{slugify, validate_name};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::category::{Category, CreateCategory, UpdateCategory};
use folio_db::repositories::CategoryRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate a name and derive its slug, rejecting names that clash with
/// another category by name or slug.
async fn checked_name(
    pool: &PgPool,
    name: &str,
    exclude_id: Option<DbId>,
) -> AppResult<(String, String)> {
    let name = name.trim();
    validate_name(name)?;
    let slug = slugify(name);
    if CategoryRepo::name_exists(pool, name, &slug, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A category named '{name}' already exists"
        ))));
    }
    Ok((name.to_string(), slug))
}

/// GET /api/v1/admin/categories
pub async fn list(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/admin/categories
pub async fn create(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    let (name, slug) = checked_name(&state.pool, &input.name, None).await?;
    let category = CategoryRepo::create(&state.pool, &name, &slug).await?;
    tracing::info!(category_id = category.id, %slug, "Category created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/admin/categories/{id}
///
/// Renaming also regenerates the slug.
pub async fn update(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let (name, slug) = checked_name(&state.pool, &input.name, Some(id)).await?;
    let category = CategoryRepo::update(&state.pool, id, &name, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(category_id = id, %slug, "Category renamed");
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// Projects keep existing; only their link to this category is removed.
pub async fn delete(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
