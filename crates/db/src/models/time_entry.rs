//! Time entry model.

use castworks_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A time entry row from the `time_entries` table.
///
/// At most one entry per (project, user) has `is_running = true`,
/// enforced by the `uq_time_entries_running` partial unique index.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub duration_minutes: i64,
    pub notes: String,
    pub is_running: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
