//! Handlers for the `/library` template resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use castworks_core::error::CoreError;
use castworks_core::products::{validate_dimensions, validate_library_category};
use castworks_core::types::DbId;
use castworks_db::models::library_template::{
    CreateLibraryTemplate, LibraryTemplate, TemplateListParams, UpdateLibraryTemplate,
};
use castworks_db::repositories::LibraryTemplateRepo;

use crate::error::{flatten_validation_errors, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEngineer;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /library
///
/// Engineer or manager only.
pub async fn create(
    RequireEngineer(auth): RequireEngineer,
    State(state): State<AppState>,
    Json(input): Json<CreateLibraryTemplate>,
) -> AppResult<impl IntoResponse> {
    let mut errors = match input.validate() {
        Ok(()) => Vec::new(),
        Err(e) => flatten_validation_errors(&e),
    };
    if let Err(msg) = validate_library_category(&input.product_category) {
        errors.push(msg);
    }
    if let Err(mut dim_errors) = validate_dimensions(
        "dimensions.",
        input.dimensions.length,
        input.dimensions.width,
        input.dimensions.height,
        input.dimensions.wall_thickness,
    ) {
        errors.append(&mut dim_errors);
    }
    if !errors.is_empty() {
        return Err(AppError::Core(CoreError::Validation(errors)));
    }

    let template = LibraryTemplateRepo::create(&state.pool, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        template_id = template.id,
        template_name = %template.template_name,
        "Library template created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /library?category=&active=
///
/// Most-used templates first. Deactivated templates appear only with
/// `active=false`.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TemplateListParams>,
) -> AppResult<Json<DataResponse<Vec<LibraryTemplate>>>> {
    if let Some(category) = &params.category {
        validate_library_category(category)
            .map_err(|msg| AppError::Core(CoreError::validation(msg)))?;
    }
    let include_inactive = params.active == Some(false);
    let templates =
        LibraryTemplateRepo::list(&state.pool, params.category.as_deref(), include_inactive)
            .await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /library/{id}
///
/// Fetching a template records a use (usage count + last-used stamp).
/// The returned row is the pre-use snapshot.
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LibraryTemplate>>> {
    let template = LibraryTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LibraryTemplate",
            id,
        }))?;

    LibraryTemplateRepo::record_use(&state.pool, id).await?;

    Ok(Json(DataResponse { data: template }))
}

/// PATCH /library/{id}
///
/// Engineer or manager only.
pub async fn update(
    RequireEngineer(auth): RequireEngineer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLibraryTemplate>,
) -> AppResult<Json<DataResponse<LibraryTemplate>>> {
    let mut errors = match input.validate() {
        Ok(()) => Vec::new(),
        Err(e) => flatten_validation_errors(&e),
    };
    if let Some(category) = &input.product_category {
        if let Err(msg) = validate_library_category(category) {
            errors.push(msg);
        }
    }
    if let Some(dims) = &input.dimensions {
        if let Err(mut dim_errors) = validate_dimensions(
            "dimensions.",
            dims.length.unwrap_or(1.0),
            dims.width.unwrap_or(1.0),
            dims.height.unwrap_or(1.0),
            dims.wall_thickness,
        ) {
            errors.append(&mut dim_errors);
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Core(CoreError::Validation(errors)));
    }

    let template = LibraryTemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LibraryTemplate",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, template_id = id, "Library template updated");

    Ok(Json(DataResponse { data: template }))
}

/// DELETE /library/{id}
///
/// Engineer or manager only. Soft delete: the template is deactivated,
/// not removed.
pub async fn delete(
    RequireEngineer(auth): RequireEngineer,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = LibraryTemplateRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "LibraryTemplate",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, template_id = id, "Library template deactivated");

    Ok(StatusCode::NO_CONTENT)
}
