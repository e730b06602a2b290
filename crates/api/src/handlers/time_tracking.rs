//! Timer start/stop handlers.
//!
//! A user has at most one running timer per project. Stopping rolls the
//! entry's rounded duration into a full recomputation of the project's
//! total hours.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use castworks_core::error::CoreError;
use castworks_core::timeclock::{duration_minutes, total_hours};
use castworks_core::types::DbId;
use castworks_db::models::time_entry::TimeEntry;
use castworks_db::repositories::{ProjectRepo, TimeEntryRepo};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::handlers::project::find_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TimerInput {
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimerStarted {
    pub entry: TimeEntry,
}

#[derive(Debug, Serialize)]
pub struct TimerStopped {
    pub entry: TimeEntry,
    /// The project's recomputed total, hours to two decimals.
    pub total_hours: f64,
}

/// POST /projects/{id}/time/start
///
/// Start a timer for the caller on this project. Conflict if one is
/// already running; the partial unique index catches a racing start.
pub async fn start(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TimerInput>,
) -> AppResult<impl IntoResponse> {
    find_project(&state, id).await?;

    if TimeEntryRepo::find_running(&state.pool, id, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Timer already running".into(),
        )));
    }

    let notes = input.notes.as_deref().unwrap_or("");
    let entry = match TimeEntryRepo::start(&state.pool, id, auth.user_id, notes).await {
        Ok(entry) => entry,
        Err(err) if is_unique_violation(&err, "uq_time_entries_running") => {
            return Err(AppError::Core(CoreError::Conflict(
                "Timer already running".into(),
            )));
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        entry_id = entry.id,
        "Timer started"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TimerStarted { entry },
        }),
    ))
}

/// POST /projects/{id}/time/stop
///
/// Stop the caller's running timer on this project. Bad request when no
/// timer is running. The duration is rounded to the nearest minute and
/// the project total recomputed from all entries.
pub async fn stop(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TimerInput>,
) -> AppResult<impl IntoResponse> {
    find_project(&state, id).await?;

    let running = TimeEntryRepo::find_running(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("No running timer found".into()))?;

    let end_time = Utc::now();
    let duration = duration_minutes(running.start_time, end_time);
    let entry = TimeEntryRepo::finish(
        &state.pool,
        running.id,
        end_time,
        duration,
        input.notes.as_deref(),
    )
    .await?;

    let total_minutes = TimeEntryRepo::sum_minutes(&state.pool, id).await?;
    let hours = total_hours(total_minutes);
    ProjectRepo::set_total_hours(&state.pool, id, hours).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        entry_id = entry.id,
        duration_minutes = duration,
        total_hours = hours,
        "Timer stopped"
    );

    Ok(Json(DataResponse {
        data: TimerStopped {
            entry,
            total_hours: hours,
        },
    }))
}
