//! Identity extractor for Axum handlers.
//!
//! Authentication itself (credentials, sessions) is owned by the
//! gateway in front of this service; it forwards the authenticated
//! caller as `x-user-id` and `x-user-role` headers on every request.
//! This extractor turns those headers into an explicit value threaded
//! through handlers, so the core stays testable without any session
//! machinery.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use castworks_core::error::CoreError;
use castworks_core::roles::validate_role;
use castworks_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the gateway identity headers.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `x-user-id`).
    pub user_id: DbId,
    /// The user's role name (from `x-user-role`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id: DbId = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing or invalid x-user-id header".into(),
                ))
            })?;

        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-user-role header".into(),
                ))
            })?;

        validate_role(&role)
            .map_err(|msg| AppError::Core(CoreError::Unauthorized(msg)))?;

        Ok(AuthUser { user_id, role })
    }
}
