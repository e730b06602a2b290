//! Repository for the `projects` table.

use sqlx::types::Json;
use sqlx::PgPool;

use castworks_core::numbering;
use castworks_core::pagination::{clamp_limit, clamp_page, page_offset};
use castworks_core::types::DbId;

use crate::models::project::{
    CreateProject, Project, ProjectListParams, ProjectSummary, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_number, project_name, customer_id, customer_name, start_date, \
     product_type, status, structures, spec_length, spec_width, spec_height, \
     spec_wall_thickness, spec_custom_notes, total_hours, sent_to_production, handoff_date, \
     drawings_finalized, specifications_verified, customer_approval_received, \
     material_list_confirmed, production_notes_added, created_by, assigned_to, completed_at, \
     created_at, updated_at";

/// Columns the list endpoint may sort by. Anything else falls back to
/// `created_at`.
const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "project_number",
    "status",
    "customer_name",
    "start_date",
];

/// Provides CRUD and lifecycle operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `project_number` and `customer_name` are resolved by the caller
    /// (sequence allocation and customer snapshot); the row starts in
    /// `requested` status with zeroed time tracking and an unchecked
    /// handoff checklist, per the table defaults.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        project_number: &str,
        customer_name: &str,
        created_by: DbId,
    ) -> Result<Project, sqlx::Error> {
        let structures = Json(input.structures.clone().unwrap_or_default());
        let query = format!(
            "INSERT INTO projects
                (project_number, project_name, customer_id, customer_name, start_date,
                 product_type, structures, spec_length, spec_width, spec_height,
                 spec_wall_thickness, spec_custom_notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(project_number)
            .bind(&input.project_name)
            .bind(input.customer_id)
            .bind(customer_name)
            .bind(input.start_date)
            .bind(&input.product_type)
            .bind(structures)
            .bind(input.specifications.length)
            .bind(input.specifications.width)
            .bind(input.specifications.height)
            .bind(input.specifications.wall_thickness)
            .bind(&input.specifications.custom_notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Identity of the project holding a given number, for
    /// duplicate-number conflict messages.
    pub async fn find_summary_by_number(
        pool: &PgPool,
        project_number: &str,
    ) -> Result<Option<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, project_number, project_name, customer_name
             FROM projects WHERE project_number = $1",
        )
        .bind(project_number)
        .fetch_optional(pool)
        .await
    }

    /// The lexicographically greatest project number carrying the
    /// year's `PRJ-<year>-` prefix, feeding the sequence allocator.
    /// Valid as a max-sequence lookup because sequences are zero-padded.
    pub async fn last_number_for_year(
        pool: &PgPool,
        year: i32,
    ) -> Result<Option<String>, sqlx::Error> {
        let pattern = format!("{}%", numbering::year_prefix(year));
        sqlx::query_scalar::<_, String>(
            "SELECT project_number FROM projects
             WHERE project_number LIKE $1
             ORDER BY project_number DESC
             LIMIT 1",
        )
        .bind(pattern)
        .fetch_optional(pool)
        .await
    }

    /// List projects with filters and pagination. Returns the page of
    /// rows and the total row count for the filter.
    pub async fn list(
        pool: &PgPool,
        params: &ProjectListParams,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let page = clamp_page(params.page);
        let offset = page_offset(page, limit);

        let sort_by = params
            .sort_by
            .as_deref()
            .filter(|col| SORTABLE_COLUMNS.contains(col))
            .unwrap_or("created_at");
        let sort_order = match params.sort_order.as_deref() {
            Some("asc") => "ASC",
            _ => "DESC",
        };

        let search = params.search.as_ref().map(|s| format!("%{s}%"));

        const FILTER: &str = "($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR product_type = $2)
               AND ($3::bigint IS NULL OR customer_id = $3)
               AND ($4::text IS NULL OR project_number ILIKE $4 OR customer_name ILIKE $4)";

        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE {FILTER}
             ORDER BY {sort_by} {sort_order}
             LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, Project>(&query)
            .bind(&params.status)
            .bind(&params.product_type)
            .bind(params.customer_id)
            .bind(&search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM projects WHERE {FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(&params.status)
            .bind(&params.product_type)
            .bind(params.customer_id)
            .bind(&search)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let spec = input.specifications.clone().unwrap_or_default();
        let checklist = input.checklist.clone().unwrap_or_default();
        let structures = input.structures.clone().map(Json);
        let query = format!(
            "UPDATE projects SET
                project_name = COALESCE($2, project_name),
                start_date = COALESCE($3, start_date),
                product_type = COALESCE($4, product_type),
                structures = COALESCE($5, structures),
                spec_length = COALESCE($6, spec_length),
                spec_width = COALESCE($7, spec_width),
                spec_height = COALESCE($8, spec_height),
                spec_wall_thickness = COALESCE($9, spec_wall_thickness),
                spec_custom_notes = COALESCE($10, spec_custom_notes),
                drawings_finalized = COALESCE($11, drawings_finalized),
                specifications_verified = COALESCE($12, specifications_verified),
                customer_approval_received = COALESCE($13, customer_approval_received),
                material_list_confirmed = COALESCE($14, material_list_confirmed),
                production_notes_added = COALESCE($15, production_notes_added),
                assigned_to = COALESCE($16, assigned_to),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.project_name)
            .bind(input.start_date)
            .bind(&input.product_type)
            .bind(structures)
            .bind(spec.length)
            .bind(spec.width)
            .bind(spec.height)
            .bind(spec.wall_thickness)
            .bind(&spec.custom_notes)
            .bind(checklist.drawings_finalized)
            .bind(checklist.specifications_verified)
            .bind(checklist.customer_approval_received)
            .bind(checklist.material_list_confirmed)
            .bind(checklist.production_notes_added)
            .bind(input.assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Assign a new status. When `clear_handoff` is set (the project is
    /// leaving `production`), the handoff flags are reset in the same
    /// statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        clear_handoff: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = if clear_handoff {
            format!(
                "UPDATE projects SET
                    status = $2,
                    sent_to_production = FALSE,
                    handoff_date = NULL,
                    updated_at = NOW()
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            )
        } else {
            format!(
                "UPDATE projects SET status = $2, updated_at = NOW()
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            )
        };
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Mark a project sent to production. Repeatable: a resubmit
    /// overwrites `handoff_date`.
    pub async fn send_to_production(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = 'production',
                sent_to_production = TRUE,
                handoff_date = NOW(),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Store a freshly recomputed time-tracking total.
    pub async fn set_total_hours(
        pool: &PgPool,
        id: DbId,
        total_hours: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE projects SET total_hours = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(total_hours)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Permanently delete a project. Returns `true` if a row was
    /// removed. Attached records cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count projects holding a given status.
    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// The most recently touched projects, for the dashboard.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Project>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM projects ORDER BY updated_at DESC LIMIT $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
