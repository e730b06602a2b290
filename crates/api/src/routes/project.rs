//! Route definitions for the `/projects` resource, including the
//! lifecycle, time-tracking, and attached-record operations.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{handoff, project, project_records, time_tracking};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /next-number                   -> next_number
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PATCH  /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PUT    /{id}/status                   -> set_status
/// POST   /{id}/send-to-production       -> send_to_production
/// POST   /{id}/time/start               -> start timer
/// POST   /{id}/time/stop                -> stop timer
/// POST   /{id}/revisions                -> add_revision
/// POST   /{id}/drawings                 -> add_drawing
/// POST   /{id}/rfis                     -> add_rfi
/// PUT    /{id}/rfis/{rfi_id}/answer     -> answer_rfi
/// ```
pub fn router() -> Router<AppState> {
    let project_routes = Router::new()
        // Static segment first so it is not captured as an {id}.
        .route("/next-number", get(project::next_number))
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route("/{id}/status", put(handoff::set_status))
        .route("/{id}/send-to-production", post(handoff::send_to_production))
        .route("/{id}/time/start", post(time_tracking::start))
        .route("/{id}/time/stop", post(time_tracking::stop))
        .route("/{id}/revisions", post(project_records::add_revision))
        .route("/{id}/drawings", post(project_records::add_drawing))
        .route("/{id}/rfis", post(project_records::add_rfi))
        .route("/{id}/rfis/{rfi_id}/answer", put(project_records::answer_rfi));

    Router::new().nest("/projects", project_routes)
}
