//! Dashboard statistics handler.

use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use castworks_core::status::VALID_STATUSES;
use castworks_core::timeclock::total_hours;
use castworks_db::models::project::Project;
use castworks_db::repositories::{CustomerRepo, ProjectRepo, TimeEntryRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many recently-touched projects the dashboard shows.
const RECENT_PROJECT_COUNT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Project counts keyed by status.
    pub projects_by_status: BTreeMap<String, i64>,
    pub total_customers: i64,
    /// The caller's recorded hours over the trailing seven days.
    pub hours_this_week: f64,
    pub recent_projects: Vec<Project>,
}

/// GET /dashboard
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let mut projects_by_status = BTreeMap::new();
    for status in VALID_STATUSES {
        let count = ProjectRepo::count_by_status(&state.pool, status).await?;
        projects_by_status.insert(status.to_string(), count);
    }

    let total_customers = CustomerRepo::count(&state.pool).await?;

    let week_ago = Utc::now() - Duration::days(7);
    let minutes = TimeEntryRepo::user_minutes_since(&state.pool, auth.user_id, week_ago).await?;

    let recent_projects = ProjectRepo::recent(&state.pool, RECENT_PROJECT_COUNT).await?;

    Ok(Json(DataResponse {
        data: DashboardStats {
            projects_by_status,
            total_customers,
            hours_this_week: total_hours(minutes),
            recent_projects,
        },
    }))
}
