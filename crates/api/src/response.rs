//! Shared response envelope types for API handlers.
//!
//! Every JSON payload is wrapped as `{ "data": ... }`. Errors use the
//! `{ "error", "code" }` shape produced by [`crate::error::AppError`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: projects }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
