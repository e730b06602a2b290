//! Handlers for the `/projects` resource: CRUD, listing, and number
//! allocation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use castworks_core::error::CoreError;
use castworks_core::numbering;
use castworks_core::pagination::{clamp_limit, clamp_page};
use castworks_core::products::{
    validate_dimensions, validate_product_type, validate_structure_type,
};
use castworks_core::status;
use castworks_core::types::DbId;
use castworks_db::models::project::{
    CreateProject, Project, ProjectDetail, ProjectListParams, Structure, UpdateProject,
    UpdateSpecifications,
};
use castworks_db::repositories::{
    CustomerRepo, DrawingRepo, ProjectRepo, RevisionRepo, RfiRepo, TimeEntryRepo,
};

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// Query parameters for the number-allocation preview.
#[derive(Debug, Deserialize)]
pub struct NextNumberParams {
    /// Defaults to the current calendar year.
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct NextNumber {
    pub project_number: String,
}

/// GET /projects/next-number?year=
///
/// Preview the next project number for a year. Read-only: the number is
/// not reserved, so it can be taken by the time a create lands.
pub async fn next_number(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NextNumberParams>,
) -> AppResult<impl IntoResponse> {
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    let last = ProjectRepo::last_number_for_year(&state.pool, year).await?;
    let project_number = numbering::next_project_number(year, last.as_deref());
    Ok(Json(DataResponse {
        data: NextNumber { project_number },
    }))
}

/// POST /projects
///
/// Create a project. Validation runs before any write; the customer
/// must exist; the number is allocated from the year sequence when not
/// supplied. On success the owning customer's history counters are
/// updated as a second, independent write.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let mut errors = Vec::new();
    if let Err(msg) = validate_product_type(&input.product_type) {
        errors.push(msg);
    }
    if let Some(structures) = &input.structures {
        collect_structure_errors(&mut errors, structures);
    }
    if let Err(mut dim_errors) = validate_dimensions(
        "specifications.",
        input.specifications.length,
        input.specifications.width,
        input.specifications.height,
        input.specifications.wall_thickness,
    ) {
        errors.append(&mut dim_errors);
    }
    if let Some(number) = &input.project_number {
        if number.trim().is_empty() {
            errors.push("project_number must not be empty".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Core(CoreError::Validation(errors)));
    }

    let customer = CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.customer_id,
        }))?;

    let project_number = match &input.project_number {
        Some(number) => number.trim().to_string(),
        None => {
            let year = Utc::now().year();
            let last = ProjectRepo::last_number_for_year(&state.pool, year).await?;
            numbering::next_project_number(year, last.as_deref())
        }
    };

    // The unique index is the backstop for concurrent allocation of the
    // same number: the losing insert comes back as a conflict carrying
    // the winner's identity.
    let project = match ProjectRepo::create(
        &state.pool,
        &input,
        &project_number,
        &customer.name,
        auth.user_id,
    )
    .await
    {
        Ok(project) => project,
        Err(err) if is_unique_violation(&err, "uq_projects_project_number") => {
            let existing = ProjectRepo::find_summary_by_number(&state.pool, &project_number)
                .await
                .ok()
                .flatten();
            return Err(AppError::DuplicateProjectNumber {
                project_number,
                existing,
            });
        }
        Err(err) => return Err(err.into()),
    };

    // Counter maintenance is best-effort after the committed insert: a
    // failure here is surfaced, never rolled back.
    if let Err(err) =
        CustomerRepo::record_project_created(&state.pool, customer.id, project.id).await
    {
        tracing::error!(
            error = %err,
            project_id = project.id,
            customer_id = customer.id,
            "Project created but customer history update failed"
        );
        return Err(AppError::InternalError(format!(
            "Project {} created but customer history update failed",
            project.project_number
        )));
    }

    tracing::info!(
        user_id = auth.user_id,
        project_id = project.id,
        project_number = %project.project_number,
        customer_id = customer.id,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /projects?status=&product_type=&customer_id=&search=&sort_by=&sort_order=&page=&limit=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Page<Project>>>> {
    let (rows, total) = ProjectRepo::list(&state.pool, &params).await?;
    let page = Page::new(rows, total, clamp_page(params.page), clamp_limit(params.limit));
    Ok(Json(DataResponse { data: page }))
}

/// GET /projects/{id}
///
/// The project row with its attached records.
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = find_project(&state, id).await?;

    let time_entries = TimeEntryRepo::list_by_project(&state.pool, id).await?;
    let revisions = RevisionRepo::list_by_project(&state.pool, id).await?;
    let drawings = DrawingRepo::list_by_project(&state.pool, id).await?;
    let rfis = RfiRepo::list_by_project(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ProjectDetail {
            project,
            time_entries,
            revisions,
            drawings,
            rfis,
        },
    }))
}

/// PATCH /projects/{id}
///
/// Partial update of project fields, including nested specifications
/// and checklist items. Status is not accepted here; status changes go
/// through the status operation so counter side effects always run.
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let mut errors = Vec::new();
    if let Some(product_type) = &input.product_type {
        if let Err(msg) = validate_product_type(product_type) {
            errors.push(msg);
        }
    }
    if let Some(structures) = &input.structures {
        collect_structure_errors(&mut errors, structures);
    }
    if let Some(spec) = &input.specifications {
        collect_spec_update_errors(&mut errors, spec);
    }
    if !errors.is_empty() {
        return Err(AppError::Core(CoreError::Validation(errors)));
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    Ok(Json(DataResponse { data: project }))
}

/// DELETE /projects/{id}
///
/// Reverses the project's contribution to the owning customer's
/// counters, then removes the row (attached records cascade).
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = find_project(&state, id).await?;

    let was_active = status::is_active(&project.status);
    if let Err(err) =
        CustomerRepo::record_project_deleted(&state.pool, project.customer_id, was_active).await
    {
        tracing::error!(
            error = %err,
            project_id = id,
            customer_id = project.customer_id,
            "Customer history update failed during project deletion"
        );
    }

    ProjectRepo::delete(&state.pool, id).await?;

    tracing::info!(
        user_id = auth.user_id,
        project_id = id,
        project_number = %project.project_number,
        "Project deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Load a project or fail with NotFound.
pub(crate) async fn find_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

fn collect_structure_errors(errors: &mut Vec<String>, structures: &[Structure]) {
    for structure in structures {
        if let Err(msg) = validate_structure_type(&structure.structure_type) {
            errors.push(msg);
        }
    }
}

fn collect_spec_update_errors(errors: &mut Vec<String>, spec: &UpdateSpecifications) {
    // Only the provided dimensions are checked; absent fields keep
    // their stored values.
    if let Err(mut dim_errors) = validate_dimensions(
        "specifications.",
        spec.length.unwrap_or(1.0),
        spec.width.unwrap_or(1.0),
        spec.height.unwrap_or(1.0),
        spec.wall_thickness,
    ) {
        errors.append(&mut dim_errors);
    }
}
