//! Admin handlers for a project's photo gallery.
//!
//! Every write loads the gallery as an [`OrderedCollection`] first so that
//! insert rank, the first-photo-is-main rule and main-photo promotion are
//! decided by the same code that handles reordering.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::catalog::{extension_for, validate_caption, validate_content_type, validate_image_url};
use folio_core::error::CoreError;
use folio_core::ordering::OrderedCollection;
use folio_core::types::DbId;
use folio_db::models::photo::{CreatePhoto, CreatePhotoFromUrl, Photo, UpdatePhoto};
use folio_db::repositories::PhotoRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::project::{find_project, ReorderRequest};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::image_dimensions;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a gallery in default order. Stray extra main flags (two racing
/// first uploads) are cleared in memory and leave the gallery dirty, so the
/// next save writes the repair.
async fn load_gallery(pool: &PgPool, project_id: DbId) -> AppResult<OrderedCollection<Photo>> {
    let photos = PhotoRepo::list_by_project(pool, project_id).await?;
    let mut gallery = OrderedCollection::from_rows(photos);
    if gallery.normalize_primary() {
        tracing::warn!(project_id, "Gallery had several main photos; keeping the first");
    }
    Ok(gallery)
}

/// Insert a photo at the end of the gallery. The first photo of an empty
/// gallery becomes its main photo.
async fn append_photo(
    pool: &PgPool,
    project_id: DbId,
    url: String,
    storage_path: Option<String>,
    caption: Option<String>,
    dimensions: Option<(u32, u32)>,
) -> AppResult<Photo> {
    let gallery = load_gallery(pool, project_id).await?;
    let (width, height) = match dimensions {
        Some((w, h)) => (i32::try_from(w).ok(), i32::try_from(h).ok()),
        None => (None, None),
    };

    let photo = PhotoRepo::create(
        pool,
        &CreatePhoto {
            project_id,
            url,
            storage_path,
            caption,
            width,
            height,
            is_main: gallery.next_is_primary(),
            display_order: gallery.next_display_order(),
        },
    )
    .await?;

    tracing::info!(
        project_id,
        photo_id = photo.id,
        display_order = photo.display_order,
        is_main = photo.is_main,
        "Photo added",
    );
    Ok(photo)
}

/// Remove stored objects no photo references any more. Failures are logged,
/// never surfaced: the rows are already gone.
pub(crate) async fn remove_stored_files<'a>(
    state: &AppState,
    keys: impl IntoIterator<Item = &'a str>,
) {
    for key in keys {
        match PhotoRepo::storage_path_in_use(&state.pool, key).await {
            Ok(false) => {}
            Ok(true) => continue,
            Err(e) => {
                tracing::warn!(%key, error = %e, "Could not check stored object usage");
                continue;
            }
        }
        if let Err(e) = state.store.delete(key).await {
            tracing::warn!(%key, error = %e, "Failed to remove stored object");
        }
    }
}

fn non_blank(caption: Option<String>) -> Option<String> {
    caption.filter(|c| !c.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects/{id}/photos
///
/// Gallery in display order, main photo first.
pub async fn list(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Photo>>>> {
    find_project(&state.pool, project_id).await?;
    let gallery = load_gallery(&state.pool, project_id).await?;
    Ok(Json(DataResponse {
        data: gallery.into_items(),
    }))
}

/// POST /api/v1/admin/projects/{id}/photos
///
/// Multipart upload: a `file` part with an image content type and an
/// optional `caption` text part.
pub async fn upload(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Photo>>)> {
    find_project(&state.pool, project_id).await?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                file = Some((content_type, field.bytes().await?.to_vec()));
            }
            "caption" => caption = Some(field.text().await?),
            _ => {}
        }
    }

    let (content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing 'file' part in upload".into()))?;

    validate_content_type(&content_type)?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    let max_bytes = state.config.upload.max_bytes;
    if data.len() > max_bytes {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Uploaded file is larger than {max_bytes} bytes"
        ))));
    }
    let caption = non_blank(caption);
    validate_caption(caption.as_deref())?;

    let extension = extension_for(&content_type).ok_or_else(|| {
        AppError::InternalError(format!("No extension mapped for '{content_type}'"))
    })?;
    let dimensions = image_dimensions(&data);
    if dimensions.is_none() {
        tracing::warn!(project_id, %content_type, "Could not read image dimensions");
    }

    let stored = state.store.put(&data, extension).await?;
    tracing::debug!(project_id, key = %stored.key, size = data.len(), "Upload stored");

    let photo = append_photo(
        &state.pool,
        project_id,
        stored.url,
        Some(stored.key),
        caption,
        dimensions,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// POST /api/v1/admin/projects/{id}/photos/url
///
/// Register a photo hosted elsewhere. Nothing is stored locally.
pub async fn create_from_url(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePhotoFromUrl>,
) -> AppResult<(StatusCode, Json<DataResponse<Photo>>)> {
    find_project(&state.pool, project_id).await?;

    validate_image_url(&input.url)?;
    let caption = non_blank(input.caption);
    validate_caption(caption.as_deref())?;

    let photo = append_photo(&state.pool, project_id, input.url, None, caption, None).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: photo })))
}

/// PUT /api/v1/admin/projects/{id}/photos/{photo_id}
///
/// Set or clear the caption. A blank caption clears it.
pub async fn update(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((project_id, photo_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdatePhoto>,
) -> AppResult<Json<DataResponse<Photo>>> {
    let caption = non_blank(input.caption);
    validate_caption(caption.as_deref())?;

    let photo = PhotoRepo::update_caption(&state.pool, project_id, photo_id, caption.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id: photo_id,
        }))?;
    Ok(Json(DataResponse { data: photo }))
}

/// DELETE /api/v1/admin/projects/{id}/photos/{photo_id}
///
/// Deleting the main photo promotes the next photo in display order.
pub async fn delete(
    State(state): State<AppState>,
    _session: AdminSession,
    Path((project_id, photo_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let mut gallery = load_gallery(&state.pool, project_id).await?;
    let removal = gallery.remove(photo_id).ok_or(AppError::Core(CoreError::NotFound {
        entity: "Photo",
        id: photo_id,
    }))?;

    if !PhotoRepo::delete(&state.pool, project_id, photo_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id: photo_id,
        }));
    }

    if let Some(promoted) = removal.promoted {
        PhotoRepo::set_main(&state.pool, promoted, true).await?;
        tracing::info!(project_id, photo_id = promoted, "Promoted new main photo");
    }
    if gallery.is_dirty() {
        PhotoRepo::save_order(&state.pool, project_id, &gallery.save_plan()).await?;
    }
    tracing::info!(project_id, photo_id, remaining = gallery.len(), "Photo deleted");

    remove_stored_files(&state, removal.item.storage_path.as_deref()).await;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/projects/{id}/photos/order
///
/// Replay a batch of move / set-main intents and save the gallery order.
/// A batch naming a photo outside this gallery is rejected before anything
/// is applied.
pub async fn reorder(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(project_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<Json<DataResponse<Vec<Photo>>>> {
    find_project(&state.pool, project_id).await?;

    let mut gallery = load_gallery(&state.pool, project_id).await?;
    gallery.validate_ops(&input.ops)?;

    let changed = gallery.apply_all(&input.ops);
    if gallery.is_dirty() {
        PhotoRepo::save_order(&state.pool, project_id, &gallery.save_plan()).await?;
        gallery.mark_saved();
    }
    tracing::info!(project_id, ops = input.ops.len(), changed, "Photo order saved");

    Ok(Json(DataResponse {
        data: gallery.into_items(),
    }))
}
