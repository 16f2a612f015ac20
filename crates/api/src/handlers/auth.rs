//! Handlers for the `/auth` resource (login, logout, password change).
//!
//! The admin surface has a single shared password. Its Argon2 hash lives in
//! `admin_settings`; on first login the hash is seeded from `ADMIN_PASSWORD`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::types::Timestamp;
use folio_db::models::admin::ADMIN_PASSWORD_KEY;
use folio_db::repositories::{AdminSettingRepo, SessionRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::issue_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LEN,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_at: Timestamp,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the stored admin password hash, seeding it from configuration when
/// none has been stored yet.
async fn admin_password_hash(state: &AppState) -> AppResult<String> {
    if let Some(setting) = AdminSettingRepo::get(&state.pool, ADMIN_PASSWORD_KEY).await? {
        return Ok(setting.value);
    }

    let Some(initial) = state.config.admin_password.as_deref() else {
        tracing::warn!("Login attempted but no admin password is configured");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Admin password is not configured".into(),
        )));
    };

    let hash = hash_password(initial)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    if AdminSettingRepo::insert_if_absent(&state.pool, ADMIN_PASSWORD_KEY, &hash).await? {
        tracing::info!("Seeded admin password from ADMIN_PASSWORD");
    }

    // Re-read: a concurrent login may have seeded first.
    AdminSettingRepo::get(&state.pool, ADMIN_PASSWORD_KEY)
        .await?
        .map(|s| s.value)
        .ok_or_else(|| AppError::InternalError("Admin password hash missing after seeding".into()))
}

fn check_password(password: &str, hash: &str) -> AppResult<bool> {
    verify_password(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Verify the shared admin password, open a session and return its token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let hash = admin_password_hash(&state).await?;

    if !check_password(&input.password, &hash)? {
        tracing::warn!("Admin login failed: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    let issued = issue_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    SessionRepo::create(&state.pool, issued.jti, issued.expires_at).await?;
    match SessionRepo::cleanup_expired(&state.pool).await {
        Ok(0) => {}
        Ok(removed) => tracing::debug!(removed, "Removed stale admin sessions"),
        Err(e) => tracing::warn!(error = %e, "Failed to remove stale admin sessions"),
    }

    tracing::info!(session = %issued.jti, expires_at = %issued.expires_at, "Admin logged in");

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token: issued.token,
            expires_at: issued.expires_at,
        },
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the caller's session. The token stops working immediately.
pub async fn logout(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<StatusCode> {
    SessionRepo::revoke(&state.pool, session.jti).await?;
    tracing::info!(session = %session.jti, "Admin logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/auth/password
///
/// Replace the shared password and end every open session, the caller's
/// included.
pub async fn change_password(
    State(state): State<AppState>,
    session: AdminSession,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let hash = admin_password_hash(&state).await?;
    if !check_password(&input.current_password, &hash)? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LEN)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let new_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    AdminSettingRepo::upsert(&state.pool, ADMIN_PASSWORD_KEY, &new_hash).await?;
    let revoked = SessionRepo::revoke_all(&state.pool).await?;

    tracing::info!(session = %session.jti, revoked, "Admin password changed");
    Ok(StatusCode::NO_CONTENT)
}
