//! User registration and profile handlers.
//!
//! Credentials and sessions are the upstream gateway's concern; these
//! endpoints manage the profile rows that projects and time entries
//! reference.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use castworks_core::contact::normalize_email;
use castworks_core::error::CoreError;
use castworks_core::roles::validate_role;
use castworks_db::models::user::{CreateUser, UpdateProfile, User};
use castworks_db::repositories::UserRepo;

use crate::error::{flatten_validation_errors, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /users
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    let mut errors = match input.validate() {
        Ok(()) => Vec::new(),
        Err(e) => flatten_validation_errors(&e),
    };
    if let Err(msg) = validate_role(&input.role) {
        errors.push(msg);
    }
    if !errors.is_empty() {
        return Err(AppError::Core(CoreError::Validation(errors)));
    }

    let email = normalize_email(&input.email);
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }

    let user = UserRepo::create(&state.pool, &input, &email).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /users/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse { data: user }))
}

/// PATCH /users/me
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<User>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse { data: user }))
}
