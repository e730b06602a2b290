#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use castworks_api::config::ServerConfig;
use castworks_api::router::build_app_router;
use castworks_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev
/// default) and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// An identity forwarded via the gateway headers.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i64,
    pub role: &'static str,
}

/// Insert a user row directly, returning its id. API requests that
/// create projects need a real user id for the `created_by` reference.
pub async fn seed_user(pool: &PgPool, email: &str, role: &'static str) -> Identity {
    let user_id: i64 =
        sqlx::query_scalar("INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING id")
            .bind("Test User")
            .bind(email)
            .bind(role)
            .fetch_one(pool)
            .await
            .expect("failed to seed user");
    Identity { user_id, role }
}

/// Issue a request through the full router. Identity headers are
/// attached when `identity` is given; a JSON body when `body` is given.
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    identity: Option<Identity>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(identity) = identity {
        builder = builder
            .header("x-user-id", identity.user_id.to_string())
            .header("x-user-role", identity.role);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, identity: Option<Identity>) -> Response {
    request(app, Method::GET, uri, identity, None).await
}

pub async fn post(app: &Router, uri: &str, identity: Option<Identity>, body: Value) -> Response {
    request(app, Method::POST, uri, identity, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, identity: Option<Identity>, body: Value) -> Response {
    request(app, Method::PATCH, uri, identity, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, identity: Option<Identity>, body: Value) -> Response {
    request(app, Method::PUT, uri, identity, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, identity: Option<Identity>) -> Response {
    request(app, Method::DELETE, uri, identity, None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("invalid JSON body: {e}"))
}

/// Create a customer through the API, returning its id.
pub async fn create_customer(app: &Router, identity: Identity, name: &str, email: &str) -> i64 {
    let response = post(
        app,
        "/api/v1/customers",
        Some(identity),
        serde_json::json!({
            "name": name,
            "contact_info": {
                "email": email,
                "phone": "(303) 555-0100"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a project through the API with standard specifications,
/// returning the response body's `data` object.
pub async fn create_project(
    app: &Router,
    identity: Identity,
    customer_id: i64,
    project_number: Option<&str>,
) -> Value {
    let mut body = serde_json::json!({
        "customer_id": customer_id,
        "product_type": "storm",
        "specifications": { "length": 8.0, "width": 10.0, "height": 12.0 }
    });
    if let Some(number) = project_number {
        body["project_number"] = Value::String(number.to_string());
    }
    let response = post(app, "/api/v1/projects", Some(identity), body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
