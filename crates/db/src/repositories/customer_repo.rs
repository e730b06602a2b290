//! Repository for the `customers` table.
//!
//! Besides plain CRUD this owns the project-history counter updates.
//! Every counter adjustment is a single UPDATE using in-database
//! arithmetic (never read-modify-write), so concurrent project
//! operations against the same customer cannot lose increments, and
//! decrements clamp at zero.

use sqlx::types::Json;
use sqlx::PgPool;

use castworks_core::pagination::{clamp_limit, clamp_page, page_offset};
use castworks_core::types::DbId;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, street, city, state, zip_code, custom_specs, \
     preferred_products, notes, requires_stamped_drawings, expedited_turnaround, \
     total_projects, active_projects, completed_this_year, recent_project_ids, \
     created_at, updated_at";

/// How many recent project ids a customer's history retains.
const RECENT_PROJECTS_KEPT: i32 = 5;

/// Provides CRUD operations for customers plus the project-history
/// counter maintenance invoked by project lifecycle operations.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    ///
    /// `email` is the caller-normalized (lowercased) address. History
    /// counters start at zero per the table defaults.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCustomer,
        email: &str,
    ) -> Result<Customer, sqlx::Error> {
        let prefs = input.preferences.clone().unwrap_or_default();
        let address = input.contact_info.address.clone();
        let query = format!(
            "INSERT INTO customers
                (name, email, phone, street, city, state, zip_code, custom_specs,
                 preferred_products, notes, requires_stamped_drawings, expedited_turnaround)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&input.name)
            .bind(email)
            .bind(&input.contact_info.phone)
            .bind(address.as_ref().and_then(|a| a.street.clone()))
            .bind(address.as_ref().and_then(|a| a.city.clone()))
            .bind(address.as_ref().and_then(|a| a.state.clone()))
            .bind(address.as_ref().and_then(|a| a.zip_code.clone()))
            .bind(Json(prefs.custom_specs.unwrap_or_default()))
            .bind(Json(prefs.preferred_products.unwrap_or_default()))
            .bind(prefs.notes.unwrap_or_default())
            .bind(prefs.requires_stamped_drawings.unwrap_or(false))
            .bind(prefs.expedited_turnaround.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find a customer by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by normalized email, for duplicate checks.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE email = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List customers ordered by name, with an optional name/email
    /// search. Returns the page of rows and the total row count.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<(Vec<Customer>, i64), sqlx::Error> {
        let limit = clamp_limit(limit);
        let offset = page_offset(clamp_page(page), limit);
        let pattern = search.map(|s| format!("%{s}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
             ORDER BY name ASC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Customer>(&query)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM customers
             WHERE ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Update a customer. Only non-`None` fields in `input` are
    /// applied. `email` is the caller-normalized replacement address,
    /// if any.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
        email: Option<&str>,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let contact = input.contact_info.clone().unwrap_or_default();
        let address = contact.address.clone();
        let prefs = input.preferences.clone().unwrap_or_default();
        let query = format!(
            "UPDATE customers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                street = COALESCE($5, street),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                zip_code = COALESCE($8, zip_code),
                custom_specs = COALESCE($9, custom_specs),
                preferred_products = COALESCE($10, preferred_products),
                notes = COALESCE($11, notes),
                requires_stamped_drawings = COALESCE($12, requires_stamped_drawings),
                expedited_turnaround = COALESCE($13, expedited_turnaround),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(email)
            .bind(&contact.phone)
            .bind(address.as_ref().and_then(|a| a.street.clone()))
            .bind(address.as_ref().and_then(|a| a.city.clone()))
            .bind(address.as_ref().and_then(|a| a.state.clone()))
            .bind(address.as_ref().and_then(|a| a.zip_code.clone()))
            .bind(prefs.custom_specs.map(Json))
            .bind(prefs.preferred_products.map(Json))
            .bind(prefs.notes)
            .bind(prefs.requires_stamped_drawings)
            .bind(prefs.expedited_turnaround)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a customer. Returns `true` if a row was
    /// removed. Fails with a foreign-key violation while projects still
    /// reference the customer.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total customer count, for the dashboard.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await
    }

    /// Record a project creation: bump both counters and push the new
    /// project onto the front of the recent list, keeping the newest
    /// five. Returns `true` if the customer row exists.
    pub async fn record_project_created(
        pool: &PgPool,
        customer_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE customers SET
                total_projects = total_projects + 1,
                active_projects = active_projects + 1,
                recent_project_ids = (ARRAY[$2]::bigint[] || recent_project_ids)[1:$3],
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(customer_id)
        .bind(project_id)
        .bind(RECENT_PROJECTS_KEPT)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a project deletion: drop the total, and the active count
    /// too when the project had not reached production. Both clamp at
    /// zero.
    pub async fn record_project_deleted(
        pool: &PgPool,
        customer_id: DbId,
        was_active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE customers SET
                total_projects = GREATEST(total_projects - 1, 0),
                active_projects = CASE
                    WHEN $2 THEN GREATEST(active_projects - 1, 0)
                    ELSE active_projects
                END,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(customer_id)
        .bind(was_active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a status-transition adjustment to `active_projects`
    /// (+1 leaving production, -1 entering it), clamped at zero.
    pub async fn adjust_active_projects(
        pool: &PgPool,
        customer_id: DbId,
        delta: i64,
    ) -> Result<bool, sqlx::Error> {
        if delta == 0 {
            return Ok(true);
        }
        let result = sqlx::query(
            "UPDATE customers SET
                active_projects = GREATEST(active_projects + $2, 0),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(customer_id)
        .bind(delta)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
