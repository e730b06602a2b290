//! Status transitions and the production handoff.
//!
//! Statuses are free-form assignments, not a strict state machine; the
//! only transition side effects are on the production edges (customer
//! active-project counter, handoff flag clearing). The explicit send
//! operation is gated on the five-item checklist and is repeatable.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use castworks_core::error::CoreError;
use castworks_core::status::{active_projects_delta, clears_handoff, validate_status};
use castworks_core::types::DbId;
use castworks_db::models::project::Project;
use castworks_db::repositories::{CustomerRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::project::find_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetStatus {
    pub status: String,
}

/// PUT /projects/{id}/status
///
/// Assign a new status. Leaving `production` clears the handoff flags;
/// crossing the production boundary in either direction adjusts the
/// customer's active-project counter.
pub async fn set_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatus>,
) -> AppResult<Json<DataResponse<Project>>> {
    validate_status(&input.status)
        .map_err(|msg| AppError::Core(CoreError::validation(msg)))?;

    let before = find_project(&state, id).await?;

    let project = ProjectRepo::set_status(
        &state.pool,
        id,
        &input.status,
        clears_handoff(&before.status, &input.status),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    }))?;

    reconcile_active_projects(&state, &before, &project.status).await;

    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        from = %before.status,
        to = %project.status,
        "Project status changed"
    );

    Ok(Json(DataResponse { data: project }))
}

/// POST /projects/{id}/send-to-production
///
/// Checklist-gated handoff. Sets status to `production`, flags the
/// handoff, and stamps the handoff date. Repeatable: a resubmit simply
/// overwrites the date (and the counter adjustment is zero since the
/// project is already in production).
pub async fn send_to_production(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let before = find_project(&state, id).await?;

    let checklist = before.checklist();
    if !checklist.is_complete() {
        return Err(AppError::Core(CoreError::PreconditionFailed(format!(
            "Handoff checklist incomplete: {}",
            checklist.missing_items().join(", ")
        ))));
    }

    let project = ProjectRepo::send_to_production(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    reconcile_active_projects(&state, &before, &project.status).await;

    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        project_number = %project.project_number,
        "Project sent to production"
    );

    Ok(Json(DataResponse { data: project }))
}

/// Apply the counter adjustment a status transition implies. Best
/// effort after the committed project write: failures are logged, not
/// rolled back.
async fn reconcile_active_projects(state: &AppState, before: &Project, new_status: &str) {
    let delta = active_projects_delta(&before.status, new_status);
    if let Err(err) =
        CustomerRepo::adjust_active_projects(&state.pool, before.customer_id, delta).await
    {
        tracing::error!(
            error = %err,
            project_id = before.id,
            customer_id = before.customer_id,
            delta,
            "Customer active-project counter update failed after status change"
        );
    }
}
