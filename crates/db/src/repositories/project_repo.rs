//! Repository for the `projects` table and its category/tag junctions.

use folio_core::ordering::RankUpdate;
use folio_core::types::{DbId, DisplayOrder};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::project::{CreateProject, Project, ProjectListParams, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, summary, description, client_name, location, \
    completed_year, cover_url, is_published, display_order, created_at, updated_at";

/// Same columns qualified with the `p` alias for JOIN queries.
const P_COLUMNS: &str = "p.id, p.title, p.slug, p.summary, p.description, p.client_name, \
    p.location, p.completed_year, p.cover_url, p.is_published, p.display_order, \
    p.created_at, p.updated_at";

/// Provides CRUD and ordering operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `slug` must already be resolved by the caller; `display_order` is the
    /// rank computed from [`ProjectRepo::max_display_order`].
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        slug: &str,
        display_order: DisplayOrder,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects \
                (title, slug, summary, description, client_name, location, \
                 completed_year, cover_url, is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, false), $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.client_name)
            .bind(&input.location)
            .bind(input.completed_year)
            .bind(&input.cover_url)
            .bind(input.is_published)
            .bind(display_order)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published project by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects WHERE slug = $1 AND is_published = true");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if another project already uses `slug`.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List all projects (drafts included) in display order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY display_order, id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List published projects in display order, optionally filtered by
    /// category slug and/or tag.
    pub async fn list_published(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS} FROM projects p \
             WHERE p.is_published = true \
               AND ($1::TEXT IS NULL OR EXISTS ( \
                    SELECT 1 FROM project_categories pc \
                    JOIN categories c ON c.id = pc.category_id \
                    WHERE pc.project_id = p.id AND c.slug = $1)) \
               AND ($2::BIGINT IS NULL OR EXISTS ( \
                    SELECT 1 FROM project_tags pt \
                    WHERE pt.project_id = p.id AND pt.tag_id = $2)) \
             ORDER BY p.display_order, p.id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(params.category.as_deref())
            .bind(params.tag_id)
            .fetch_all(pool)
            .await
    }

    /// Highest `display_order` among all projects, `None` when there are none.
    pub async fn max_display_order(pool: &PgPool) -> Result<Option<DisplayOrder>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DisplayOrder>>("SELECT MAX(display_order) FROM projects")
            .fetch_one(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                title = COALESCE($2, title), \
                slug = COALESCE($3, slug), \
                summary = COALESCE($4, summary), \
                description = COALESCE($5, description), \
                client_name = COALESCE($6, client_name), \
                location = COALESCE($7, location), \
                completed_year = COALESCE($8, completed_year), \
                cover_url = COALESCE($9, cover_url), \
                is_published = COALESCE($10, is_published) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.client_name)
            .bind(&input.location)
            .bind(input.completed_year)
            .bind(&input.cover_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Photos and junction rows cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist a save plan for the project list in one transaction.
    ///
    /// Every update must hit an existing row; otherwise the whole plan is
    /// rolled back and `RowNotFound` is returned.
    pub async fn save_order(pool: &PgPool, plan: &[RankUpdate]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for update in plan {
            let result = sqlx::query("UPDATE projects SET display_order = $2 WHERE id = $1")
                .bind(update.id)
                .bind(update.display_order)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(sqlx::Error::RowNotFound);
            }
        }
        tracing::debug!(items = plan.len(), "Committing project order");
        tx.commit().await
    }

    // -----------------------------------------------------------------------
    // Category / tag assignments
    // -----------------------------------------------------------------------

    /// Replace the project's categories with `category_ids`.
    pub async fn set_categories(
        pool: &PgPool,
        project_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM project_categories WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        insert_links(&mut tx, "project_categories", "category_id", project_id, category_ids)
            .await?;
        tx.commit().await
    }

    /// Replace the project's tags with `tag_ids`.
    pub async fn set_tags(
        pool: &PgPool,
        project_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM project_tags WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await?;
        insert_links(&mut tx, "project_tags", "tag_id", project_id, tag_ids).await?;
        tx.commit().await
    }
}

/// Insert junction rows for `project_id`. Duplicate ids are ignored.
async fn insert_links(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    project_id: DbId,
    ids: &[DbId],
) -> Result<(), sqlx::Error> {
    if ids.is_empty() {
        return Ok(());
    }
    let query = format!(
        "INSERT INTO {table} (project_id, {column}) \
         SELECT $1, unnest($2::BIGINT[]) \
         ON CONFLICT DO NOTHING"
    );
    sqlx::query(&query)
        .bind(project_id)
        .bind(ids)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
