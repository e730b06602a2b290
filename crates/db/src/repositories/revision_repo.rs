//! Repository for the `revisions` table. Append-only.

use sqlx::PgPool;

use castworks_core::types::DbId;

use crate::models::revision::{CreateRevision, Revision};

const COLUMNS: &str =
    "id, project_id, revision_number, date, description, requested_by, completed_by, created_at";

/// Provides append and list operations for the revision log.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a revision, assigning the next revision number for the
    /// project in-statement.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateRevision,
    ) -> Result<Revision, sqlx::Error> {
        let query = format!(
            "INSERT INTO revisions (project_id, revision_number, description, requested_by, completed_by)
             SELECT $1, COALESCE(MAX(revision_number), 0) + 1, $2, $3, $4
             FROM revisions WHERE project_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(project_id)
            .bind(&input.description)
            .bind(&input.requested_by)
            .bind(input.completed_by)
            .fetch_one(pool)
            .await
    }

    /// All revisions for a project, in revision order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Revision>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM revisions
             WHERE project_id = $1
             ORDER BY revision_number ASC"
        );
        sqlx::query_as::<_, Revision>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
