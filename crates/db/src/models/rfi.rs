//! RFI (request for information) model and DTOs.

use castworks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const RFI_STATUS_OPEN: &str = "open";
pub const RFI_STATUS_ANSWERED: &str = "answered";

/// An RFI row from the `rfis` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rfi {
    pub id: DbId,
    pub project_id: DbId,
    pub question: String,
    pub asked_by: DbId,
    pub asked_at: Timestamp,
    pub answer: Option<String>,
    pub answered_by: Option<DbId>,
    pub answered_at: Option<Timestamp>,
    pub status: String,
}

/// DTO for raising an RFI.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRfi {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
}

/// DTO for answering an RFI.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnswerRfi {
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
}
