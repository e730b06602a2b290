//! Handlers for the `/customers` resource.
//!
//! The project-history counters on a customer are read-only here: they
//! are maintained exclusively by project lifecycle operations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use castworks_core::contact::normalize_email;
use castworks_core::error::CoreError;
use castworks_core::pagination::{clamp_limit, clamp_page};
use castworks_core::types::DbId;
use castworks_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use castworks_db::repositories::CustomerRepo;

use crate::error::{flatten_validation_errors, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireEngineer, RequireManager};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Query parameters for the customer list endpoint.
#[derive(Debug, Deserialize)]
pub struct CustomerListParams {
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /customers
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;

    let email = normalize_email(&input.contact_info.email);

    if CustomerRepo::find_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Customer with this email already exists".into(),
        )));
    }

    let customer = CustomerRepo::create(&state.pool, &input, &email).await?;

    tracing::info!(
        user_id = auth.user_id,
        customer_id = customer.id,
        "Customer created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// GET /customers?search=&page=&limit=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<Json<DataResponse<Page<Customer>>>> {
    let (rows, total) =
        CustomerRepo::list(&state.pool, params.search.as_deref(), params.page, params.limit)
            .await?;
    let page = Page::new(rows, total, clamp_page(params.page), clamp_limit(params.limit));
    Ok(Json(DataResponse { data: page }))
}

/// GET /customers/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Customer>>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;
    Ok(Json(DataResponse { data: customer }))
}

/// PATCH /customers/{id}
///
/// Manager or engineer only. Renaming a customer does not touch the
/// `customer_name` snapshots on its existing projects.
pub async fn update(
    RequireEngineer(auth): RequireEngineer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<Json<DataResponse<Customer>>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(flatten_validation_errors(&e))))?;

    let email = input
        .contact_info
        .as_ref()
        .and_then(|c| c.email.as_deref())
        .map(normalize_email);

    if let Some(email) = &email {
        if let Some(existing) = CustomerRepo::find_by_email(&state.pool, email).await? {
            if existing.id != id {
                return Err(AppError::Core(CoreError::Conflict(
                    "Customer with this email already exists".into(),
                )));
            }
        }
    }

    let customer = CustomerRepo::update(&state.pool, id, &input, email.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, customer_id = id, "Customer updated");

    Ok(Json(DataResponse { data: customer }))
}

/// DELETE /customers/{id}
///
/// Manager only. Fails with a conflict while projects still reference
/// the customer.
pub async fn delete(
    RequireManager(auth): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CustomerRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, customer_id = id, "Customer deleted");

    Ok(StatusCode::NO_CONTENT)
}
