//! JWT + session extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::types::Timestamp;
use folio_db::repositories::SessionRepo;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// An authenticated admin request.
///
/// Extraction succeeds only when the `Authorization: Bearer <token>` header
/// carries a valid token whose session has not been revoked (logout or
/// password change) and has not expired.
///
/// ```ignore
/// async fn my_handler(session: AdminSession) -> AppResult<StatusCode> {
///     tracing::info!(session = %session.jti, "handling admin request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub jti: Uuid,
    pub expires_at: Timestamp,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Pull the raw token out of an `Authorization` header value.
pub fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let jti = claims
            .session_id()
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        let session = SessionRepo::find_active(&state.pool, jti)
            .await?
            .ok_or_else(|| unauthorized("Session has ended. Please log in again"))?;

        Ok(AdminSession {
            jti: session.jti,
            expires_at: session.expires_at,
        })
    }
}
