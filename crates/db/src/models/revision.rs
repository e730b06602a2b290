//! Revision log model and DTO. Append-only.

use castworks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A revision row from the `revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Revision {
    pub id: DbId,
    pub project_id: DbId,
    pub revision_number: i32,
    pub date: Timestamp,
    pub description: String,
    pub requested_by: String,
    pub completed_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for appending a revision. The revision number is assigned
/// server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRevision {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Requested-by is required"))]
    pub requested_by: String,
    pub completed_by: Option<DbId>,
}
