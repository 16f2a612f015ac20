//! Repository for the `admin_sessions` table.

use folio_core::types::Timestamp;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::admin::AdminSession;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, jti, created_at, expires_at, revoked_at";

/// Provides issue / lookup / revoke operations for admin sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Record a newly issued session.
    pub async fn create(
        pool: &PgPool,
        jti: Uuid,
        expires_at: Timestamp,
    ) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (jti, expires_at) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(jti)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session that is neither revoked nor expired.
    pub async fn find_active(pool: &PgPool, jti: Uuid) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_sessions \
             WHERE jti = $1 AND revoked_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(jti)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if an active session was revoked.
    pub async fn revoke(pool: &PgPool, jti: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET revoked_at = NOW() WHERE jti = $1 AND revoked_at IS NULL",
        )
        .bind(jti)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every active session, e.g. after a password change.
    pub async fn revoke_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE admin_sessions SET revoked_at = NOW() WHERE revoked_at IS NULL")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired or revoked sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM admin_sessions WHERE expires_at < NOW() OR revoked_at IS NOT NULL",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
