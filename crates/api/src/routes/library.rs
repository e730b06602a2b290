//! Route definitions for the `/library` template resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::library;
use crate::state::AppState;

/// Routes mounted at `/library`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create (engineer or manager)
/// GET    /{id}        -> get_by_id (records a use)
/// PATCH  /{id}        -> update (engineer or manager)
/// DELETE /{id}        -> delete = deactivate (engineer or manager)
/// ```
pub fn router() -> Router<AppState> {
    let library_routes = Router::new()
        .route("/", get(library::list).post(library::create))
        .route(
            "/{id}",
            get(library::get_by_id)
                .patch(library::update)
                .delete(library::delete),
        );

    Router::new().nest("/library", library_routes)
}
