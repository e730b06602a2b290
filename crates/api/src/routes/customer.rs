//! Route definitions for the `/customers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Routes mounted at `/customers`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{id}        -> get_by_id
/// PATCH  /{id}        -> update (engineer or manager)
/// DELETE /{id}        -> delete (manager)
/// ```
pub fn router() -> Router<AppState> {
    let customer_routes = Router::new()
        .route("/", get(customer::list).post(customer::create))
        .route(
            "/{id}",
            get(customer::get_by_id)
                .patch(customer::update)
                .delete(customer::delete),
        );

    Router::new().nest("/customers", customer_routes)
}
