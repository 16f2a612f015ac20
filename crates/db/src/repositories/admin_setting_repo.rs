//! Repository for the `admin_settings` key/value table.

use sqlx::PgPool;

use crate::models::admin::AdminSetting;

/// Provides get/upsert access to admin settings.
pub struct AdminSettingRepo;

impl AdminSettingRepo {
    /// Fetch a setting by key.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<AdminSetting>, sqlx::Error> {
        sqlx::query_as::<_, AdminSetting>(
            "SELECT key, value, updated_at FROM admin_settings WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(pool)
        .await
    }

    /// Insert or replace a setting, using `key` as the conflict key.
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> Result<AdminSetting, sqlx::Error> {
        sqlx::query_as::<_, AdminSetting>(
            "INSERT INTO admin_settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW() \
             RETURNING key, value, updated_at",
        )
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await
    }

    /// Insert a setting only if the key is absent. Returns `true` if inserted.
    pub async fn insert_if_absent(pool: &PgPool, key: &str, value: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO admin_settings (key, value) VALUES ($1, $2) ON CONFLICT (key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
