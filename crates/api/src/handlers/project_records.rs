//! Append-only records attached to a project: revisions, drawing
//! metadata, and handoff RFIs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use castworks_core::error::CoreError;
use castworks_core::types::DbId;
use castworks_db::models::drawing::CreateDrawing;
use castworks_db::models::revision::CreateRevision;
use castworks_db::models::rfi::{AnswerRfi, CreateRfi};
use castworks_db::repositories::{DrawingRepo, RevisionRepo, RfiRepo};

use crate::error::{flatten_validation_errors, AppError, AppResult};
use crate::handlers::project::find_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /projects/{id}/revisions
///
/// Append a revision; the revision number is assigned server-side.
pub async fn add_revision(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateRevision>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;
    find_project(&state, id).await?;

    let revision = RevisionRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: revision })))
}

/// POST /projects/{id}/drawings
///
/// Register a drawing's metadata. The file itself lives in external
/// storage.
pub async fn add_drawing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDrawing>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;
    find_project(&state, id).await?;

    let drawing = DrawingRepo::create(&state.pool, id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: drawing })))
}

/// POST /projects/{id}/rfis
///
/// Raise an open RFI against the project.
pub async fn add_rfi(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateRfi>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;
    find_project(&state, id).await?;

    let rfi = RfiRepo::create(&state.pool, id, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: rfi })))
}

/// PUT /projects/{id}/rfis/{rfi_id}/answer
pub async fn answer_rfi(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, rfi_id)): Path<(DbId, DbId)>,
    Json(input): Json<AnswerRfi>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;
    find_project(&state, id).await?;

    let rfi = RfiRepo::answer(&state.pool, id, rfi_id, &input.answer, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Rfi",
            id: rfi_id,
        }))?;

    Ok(Json(DataResponse { data: rfi }))
}
