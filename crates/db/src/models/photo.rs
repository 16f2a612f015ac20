//! Project photo model and DTOs.

use folio_core::ordering::Orderable;
use folio_core::types::{DbId, DisplayOrder, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `project_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub project_id: DbId,
    /// Public URL returned by the object store.
    pub url: String,
    /// Object-store key, used to remove the file when the photo is deleted.
    /// `None` for photos registered by external URL.
    pub storage_path: Option<String>,
    pub caption: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// The project's cover photo. At most one per project by convention.
    pub is_main: bool,
    pub display_order: DisplayOrder,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Orderable for Photo {
    const HAS_PRIMARY: bool = true;

    fn id(&self) -> DbId {
        self.id
    }

    fn display_order(&self) -> DisplayOrder {
        self.display_order
    }

    fn set_display_order(&mut self, order: DisplayOrder) {
        self.display_order = order;
    }

    fn is_primary(&self) -> bool {
        self.is_main
    }

    fn set_primary(&mut self, primary: bool) {
        self.is_main = primary;
    }
}

/// Insert payload for a photo. Rank and main flag are decided by the caller
/// from the current collection.
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub project_id: DbId,
    pub url: String,
    pub storage_path: Option<String>,
    pub caption: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub is_main: bool,
    pub display_order: DisplayOrder,
}

/// Request body for registering a photo hosted elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhotoFromUrl {
    pub url: String,
    pub caption: Option<String>,
}

/// DTO for updating a photo's caption.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePhoto {
    pub caption: Option<String>,
}
