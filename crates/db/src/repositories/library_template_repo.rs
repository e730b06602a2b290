//! Repository for the `library_templates` table.

use sqlx::PgPool;

use castworks_core::types::DbId;

use crate::models::library_template::{
    CreateLibraryTemplate, LibraryTemplate, UpdateLibraryTemplate,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, template_name, product_category, dim_length, dim_width, dim_height, \
     dim_wall_thickness, design_load, soil_cover, water_table, rebar_schedule, notes, \
     is_active, usage_count, last_used, created_by, created_at, updated_at";

/// Provides CRUD and usage tracking for library templates.
pub struct LibraryTemplateRepo;

impl LibraryTemplateRepo {
    /// Insert a new template, returning the created row. Starts active
    /// with zero uses.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLibraryTemplate,
        created_by: DbId,
    ) -> Result<LibraryTemplate, sqlx::Error> {
        let load = input.load_requirements.clone().unwrap_or_default();
        let query = format!(
            "INSERT INTO library_templates
                (template_name, product_category, dim_length, dim_width, dim_height,
                 dim_wall_thickness, design_load, soil_cover, water_table, rebar_schedule,
                 notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LibraryTemplate>(&query)
            .bind(&input.template_name)
            .bind(&input.product_category)
            .bind(input.dimensions.length)
            .bind(input.dimensions.width)
            .bind(input.dimensions.height)
            .bind(input.dimensions.wall_thickness)
            .bind(load.design_load)
            .bind(load.soil_cover)
            .bind(load.water_table)
            .bind(&input.rebar_schedule)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a template by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LibraryTemplate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM library_templates WHERE id = $1");
        sqlx::query_as::<_, LibraryTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List templates, most-used first. Filters by category when given;
    /// includes deactivated templates only when `include_inactive`.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<LibraryTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM library_templates
             WHERE ($1::text IS NULL OR product_category = $1)
               AND ($2 OR is_active)
             ORDER BY usage_count DESC"
        );
        sqlx::query_as::<_, LibraryTemplate>(&query)
            .bind(category)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Update a template. Only non-`None` fields in `input` are
    /// applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLibraryTemplate,
    ) -> Result<Option<LibraryTemplate>, sqlx::Error> {
        let dims = input.dimensions.clone().unwrap_or_default();
        let load = input.load_requirements.clone().unwrap_or_default();
        let query = format!(
            "UPDATE library_templates SET
                template_name = COALESCE($2, template_name),
                product_category = COALESCE($3, product_category),
                dim_length = COALESCE($4, dim_length),
                dim_width = COALESCE($5, dim_width),
                dim_height = COALESCE($6, dim_height),
                dim_wall_thickness = COALESCE($7, dim_wall_thickness),
                design_load = COALESCE($8, design_load),
                soil_cover = COALESCE($9, soil_cover),
                water_table = COALESCE($10, water_table),
                rebar_schedule = COALESCE($11, rebar_schedule),
                notes = COALESCE($12, notes),
                is_active = COALESCE($13, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LibraryTemplate>(&query)
            .bind(id)
            .bind(&input.template_name)
            .bind(&input.product_category)
            .bind(dims.length)
            .bind(dims.width)
            .bind(dims.height)
            .bind(dims.wall_thickness)
            .bind(load.design_load)
            .bind(load.soil_cover)
            .bind(load.water_table)
            .bind(&input.rebar_schedule)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a template. Returns `true` if a row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE library_templates SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a use: bump the counter and stamp last_used. A single
    /// atomic statement, so concurrent fetches cannot lose counts.
    pub async fn record_use(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE library_templates SET usage_count = usage_count + 1, last_used = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
