//! Integration tests for the library template endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch, post, seed_user};
use serde_json::json;
use sqlx::PgPool;

fn template_body() -> serde_json::Value {
    json!({
        "template_name": "Std SSMH 4x4",
        "product_category": "storm",
        "dimensions": { "length": 4.0, "width": 4.0, "height": 6.0, "wall_thickness": 0.5 },
        "load_requirements": { "design_load": "HS-20" }
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_engineer_or_manager(pool: PgPool) {
    let designer = seed_user(&pool, "kim@example.com", "designer").await;
    let engineer = seed_user(&pool, "dana@example.com", "engineer").await;
    let app = common::build_test_app(pool);

    let response = post(&app, "/api/v1/library", Some(designer), template_body()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post(&app, "/api/v1/library", Some(engineer), template_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["template_name"], "Std SSMH 4x4");
    assert_eq!(json["data"]["is_active"], true);
    assert_eq!(json["data"]["usage_count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_category_and_dimensions_rejected(pool: PgPool) {
    let engineer = seed_user(&pool, "dana@example.com", "engineer").await;
    let app = common::build_test_app(pool);

    let response = post(
        &app,
        "/api/v1/library",
        Some(engineer),
        json!({
            "template_name": "Bad",
            "product_category": "plastic",
            "dimensions": { "length": 0.0, "width": 4.0, "height": 6.0 }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2, "category and length both reported");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn fetching_a_template_records_a_use(pool: PgPool) {
    let engineer = seed_user(&pool, "dana@example.com", "engineer").await;
    let app = common::build_test_app(pool);

    let response = post(&app, "/api/v1/library", Some(engineer), template_body()).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // The fetch returns the pre-use snapshot...
    let response = get(&app, &format!("/api/v1/library/{id}"), Some(engineer)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["usage_count"], 0);

    // ...and the use shows up on the next read.
    let response = get(&app, &format!("/api/v1/library/{id}"), Some(engineer)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["usage_count"], 1);
    assert!(!json["data"]["last_used"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_deactivates_and_default_list_hides(pool: PgPool) {
    let engineer = seed_user(&pool, "dana@example.com", "engineer").await;
    let app = common::build_test_app(pool);

    let response = post(&app, "/api/v1/library", Some(engineer), template_body()).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/v1/library/{id}"), Some(engineer)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, "/api/v1/library", Some(engineer)).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = get(&app, "/api/v1/library?active=false", Some(engineer)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["is_active"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_partial_fields(pool: PgPool) {
    let engineer = seed_user(&pool, "dana@example.com", "engineer").await;
    let app = common::build_test_app(pool);

    let response = post(&app, "/api/v1/library", Some(engineer), template_body()).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = patch(
        &app,
        &format!("/api/v1/library/{id}"),
        Some(engineer),
        json!({ "notes": "superseded by rev B", "dimensions": { "height": 7.0 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["notes"], "superseded by rev B");
    assert_eq!(json["data"]["dim_height"], 7.0);
    assert_eq!(json["data"]["dim_length"], 4.0);
}
