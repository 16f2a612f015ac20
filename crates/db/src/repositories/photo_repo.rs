//! Repository for the `project_photos` table.

use folio_core::ordering::RankUpdate;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, url, storage_path, caption, width, height, \
    is_main, display_order, created_at, updated_at";

/// Provides CRUD and ordering operations for project photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a new photo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_photos \
                (project_id, url, storage_path, caption, width, height, is_main, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.project_id)
            .bind(&input.url)
            .bind(&input.storage_path)
            .bind(&input.caption)
            .bind(input.width)
            .bind(input.height)
            .bind(input.is_main)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    /// List a project's photos in default gallery order: main photo first,
    /// then `display_order`, then id.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_photos \
             WHERE project_id = $1 \
             ORDER BY is_main DESC, display_order, id"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a photo's caption. Returns `None` if the photo does not exist
    /// in the project.
    pub async fn update_caption(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        caption: Option<&str>,
    ) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!(
            "UPDATE project_photos SET caption = $3 \
             WHERE id = $1 AND project_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .bind(project_id)
            .bind(caption)
            .fetch_optional(pool)
            .await
    }

    /// Set the main flag on a single photo. Used to promote a new cover
    /// immediately after the previous one is deleted.
    pub async fn set_main(pool: &PgPool, id: DbId, is_main: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE project_photos SET is_main = $2 WHERE id = $1")
            .bind(id)
            .bind(is_main)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a photo by ID within a project. Returns `true` if a row was
    /// removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_photos WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any photo still references a stored object. Stored objects are
    /// content-addressed, so identical uploads share one key.
    pub async fn storage_path_in_use(pool: &PgPool, storage_path: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM project_photos WHERE storage_path = $1)",
        )
        .bind(storage_path)
        .fetch_one(pool)
        .await
    }

    /// Persist a save plan for one project's gallery in one transaction.
    ///
    /// Updates are scoped to `project_id`, so ids from another project are
    /// never touched; such an id aborts the plan with `RowNotFound`.
    pub async fn save_order(
        pool: &PgPool,
        project_id: DbId,
        plan: &[RankUpdate],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for update in plan {
            let result = sqlx::query(
                "UPDATE project_photos SET display_order = $2, is_main = $3 \
                 WHERE id = $1 AND project_id = $4",
            )
            .bind(update.id)
            .bind(update.display_order)
            .bind(update.is_primary)
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(sqlx::Error::RowNotFound);
            }
        }
        tracing::debug!(project_id, items = plan.len(), "Committing photo order");
        tx.commit().await
    }
}
