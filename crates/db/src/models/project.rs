//! Project (case study) entity model and DTOs.

use folio_core::ordering::Orderable;
use folio_core::types::{DbId, DisplayOrder, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::photo::Photo;
use crate::models::tag::Tag;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub completed_year: Option<i32>,
    pub cover_url: Option<String>,
    pub is_published: bool,
    pub display_order: DisplayOrder,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Orderable for Project {
    fn id(&self) -> DbId {
        self.id
    }

    fn display_order(&self) -> DisplayOrder {
        self.display_order
    }

    fn set_display_order(&mut self, order: DisplayOrder) {
        self.display_order = order;
    }
}

/// A project together with its gallery and classification.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithRelations {
    #[serde(flatten)]
    pub project: Project,
    pub photos: Vec<Photo>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    /// Derived from `title` when omitted.
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub completed_year: Option<i32>,
    pub cover_url: Option<String>,
    /// Defaults to `false` (draft) if omitted.
    pub is_published: Option<bool>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub completed_year: Option<i32>,
    pub cover_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Query parameters for the public project listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    /// Only projects in the category with this slug.
    pub category: Option<String>,
    /// Only projects carrying the tag with this id.
    pub tag_id: Option<DbId>,
}

/// Request body for replacing a project's category or tag assignments.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRelationsRequest {
    pub ids: Vec<DbId>,
}
