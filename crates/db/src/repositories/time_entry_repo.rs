//! Repository for the `time_entries` table.

use sqlx::PgPool;

use castworks_core::types::{DbId, Timestamp};

use crate::models::time_entry::TimeEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, start_time, end_time, duration_minutes, notes, \
     is_running, created_at, updated_at";

/// Provides timer operations and duration rollups for time entries.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// The user's currently running entry on a project, if any.
    pub async fn find_running(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE project_id = $1 AND user_id = $2 AND is_running"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Start a timer: insert a running entry with zero duration.
    ///
    /// The `uq_time_entries_running` partial unique index rejects a
    /// second running entry for the same (project, user) if two starts
    /// race past the handler's pre-check.
    pub async fn start(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        notes: &str,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries (project_id, user_id, start_time, notes, is_running)
             VALUES ($1, $2, NOW(), $3, TRUE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    /// Close a running entry with its computed duration. Notes are
    /// replaced only when provided.
    pub async fn finish(
        pool: &PgPool,
        entry_id: DbId,
        end_time: Timestamp,
        duration_minutes: i64,
        notes: Option<&str>,
    ) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "UPDATE time_entries SET
                end_time = $2,
                duration_minutes = $3,
                is_running = FALSE,
                notes = COALESCE($4, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(entry_id)
            .bind(end_time)
            .bind(duration_minutes)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    /// Sum of recorded minutes across all of a project's entries. The
    /// project total is always recomputed from this, never adjusted
    /// incrementally.
    pub async fn sum_minutes(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(duration_minutes), 0)::bigint
             FROM time_entries WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// All entries for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE project_id = $1
             ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Minutes a user has recorded since an instant, across all
    /// projects. Feeds the dashboard's hours-this-week stat.
    pub async fn user_minutes_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(duration_minutes), 0)::bigint
             FROM time_entries
             WHERE user_id = $1 AND start_time >= $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await
    }
}
