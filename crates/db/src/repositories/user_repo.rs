//! Repository for the `users` table.

use sqlx::PgPool;

use castworks_core::types::DbId;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, phone, email_notifications, \
     production_notifications, weekly_reports, last_login, created_at, updated_at";

/// Provides CRUD operations for user profiles.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. `email` is the
    /// caller-normalized (lowercased) address.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        email: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(email)
            .bind(&input.role)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a user by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by normalized email, for duplicate checks.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email_notifications = COALESCE($4, email_notifications),
                production_notifications = COALESCE($5, production_notifications),
                weekly_reports = COALESCE($6, weekly_reports),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(input.email_notifications)
            .bind(input.production_notifications)
            .bind(input.weekly_reports)
            .fetch_optional(pool)
            .await
    }
}
