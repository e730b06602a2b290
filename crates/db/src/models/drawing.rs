//! Drawing metadata model and DTO. Append-only; file storage and
//! rendering are handled elsewhere.

use castworks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A drawing row from the `drawings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Drawing {
    pub id: DbId,
    pub project_id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub version: i32,
    pub mime_type: String,
    pub uploaded_by: DbId,
    pub uploaded_at: Timestamp,
}

/// DTO for registering a drawing's metadata.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDrawing {
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "File URL is required"))]
    pub file_url: String,
    #[validate(range(min = 0, message = "File size must not be negative"))]
    pub file_size: i64,
    pub version: Option<i32>,
    #[validate(length(min = 1, message = "MIME type is required"))]
    pub mime_type: String,
}
