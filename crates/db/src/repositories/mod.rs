//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_setting_repo;
pub mod category_repo;
pub mod photo_repo;
pub mod project_repo;
pub mod session_repo;
pub mod tag_repo;

pub use admin_setting_repo::AdminSettingRepo;
pub use category_repo::CategoryRepo;
pub use photo_repo::PhotoRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use tag_repo::TagRepo;
