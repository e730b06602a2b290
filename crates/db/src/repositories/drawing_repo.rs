//! Repository for the `drawings` table. Append-only metadata.

use sqlx::PgPool;

use castworks_core::types::DbId;

use crate::models::drawing::{CreateDrawing, Drawing};

const COLUMNS: &str =
    "id, project_id, file_name, file_url, file_size, version, mime_type, uploaded_by, uploaded_at";

/// Provides append and list operations for drawing metadata.
pub struct DrawingRepo;

impl DrawingRepo {
    /// Register a drawing's metadata.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        uploaded_by: DbId,
        input: &CreateDrawing,
    ) -> Result<Drawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawings (project_id, file_name, file_url, file_size, version, mime_type, uploaded_by)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(project_id)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .bind(input.file_size)
            .bind(input.version)
            .bind(&input.mime_type)
            .bind(uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// All drawings for a project, newest upload first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Drawing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drawings
             WHERE project_id = $1
             ORDER BY uploaded_at DESC"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
