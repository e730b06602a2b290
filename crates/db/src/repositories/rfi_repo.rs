//! Repository for the `rfis` table.

use sqlx::PgPool;

use castworks_core::types::DbId;

use crate::models::rfi::{CreateRfi, Rfi};

const COLUMNS: &str =
    "id, project_id, question, asked_by, asked_at, answer, answered_by, answered_at, status";

/// Provides operations for handoff RFIs.
pub struct RfiRepo;

impl RfiRepo {
    /// Raise a new RFI in `open` status.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        asked_by: DbId,
        input: &CreateRfi,
    ) -> Result<Rfi, sqlx::Error> {
        let query = format!(
            "INSERT INTO rfis (project_id, question, asked_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rfi>(&query)
            .bind(project_id)
            .bind(&input.question)
            .bind(asked_by)
            .fetch_one(pool)
            .await
    }

    /// Answer an RFI, marking it `answered`. Scoped to the project so a
    /// mismatched project/RFI pair reads as not-found.
    ///
    /// Returns `None` if no matching row exists.
    pub async fn answer(
        pool: &PgPool,
        project_id: DbId,
        rfi_id: DbId,
        answer: &str,
        answered_by: DbId,
    ) -> Result<Option<Rfi>, sqlx::Error> {
        let query = format!(
            "UPDATE rfis SET
                answer = $3,
                answered_by = $4,
                answered_at = NOW(),
                status = 'answered'
             WHERE id = $2 AND project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rfi>(&query)
            .bind(project_id)
            .bind(rfi_id)
            .bind(answer)
            .bind(answered_by)
            .fetch_optional(pool)
            .await
    }

    /// All RFIs for a project, oldest first.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Rfi>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM rfis
             WHERE project_id = $1
             ORDER BY asked_at ASC"
        );
        sqlx::query_as::<_, Rfi>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
