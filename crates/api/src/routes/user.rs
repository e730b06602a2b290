//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /        -> register
/// GET    /me      -> profile
/// PATCH  /me      -> update profile
/// ```
pub fn router() -> Router<AppState> {
    let user_routes = Router::new()
        .route("/", post(user::register))
        .route("/me", get(user::me).patch(user::update_me));

    Router::new().nest("/users", user_routes)
}
