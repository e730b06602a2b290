pub mod customer;
pub mod dashboard;
pub mod health;
pub mod library;
pub mod project;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects/next-number                     allocate-number preview (GET)
/// /projects                                 list, create
/// /projects/{id}                            get, update, delete
/// /projects/{id}/status                     set status (PUT)
/// /projects/{id}/send-to-production         checklist-gated handoff (POST)
/// /projects/{id}/time/start                 start timer (POST)
/// /projects/{id}/time/stop                  stop timer (POST)
/// /projects/{id}/revisions                  append revision (POST)
/// /projects/{id}/drawings                   register drawing metadata (POST)
/// /projects/{id}/rfis                       raise RFI (POST)
/// /projects/{id}/rfis/{rfi_id}/answer       answer RFI (PUT)
///
/// /customers                                list, create
/// /customers/{id}                           get, update (engineer+), delete (manager)
///
/// /library                                  list, create (engineer+)
/// /library/{id}                             get (records a use), update, delete (engineer+)
///
/// /users                                    register (POST)
/// /users/me                                 profile get, update
///
/// /dashboard                                status counts, hours, recent projects (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(project::router())
        .merge(customer::router())
        .merge(library::router())
        .merge(user::router())
        .merge(dashboard::router())
}
