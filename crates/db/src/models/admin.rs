//! Admin settings and session models.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Settings key holding the Argon2 hash of the shared admin password.
pub const ADMIN_PASSWORD_KEY: &str = "admin_password_hash";

/// A row from the `admin_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminSetting {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}

/// A row from the `admin_sessions` table. One per successful login.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub jti: Uuid,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}
