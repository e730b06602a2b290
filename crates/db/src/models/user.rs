//! User profile model and DTOs.
//!
//! Credentials and sessions live in the upstream identity provider;
//! this table only carries the profile referenced by projects and time
//! entries.

use castworks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub email_notifications: bool,
    pub production_notifications: bool,
    pub weekly_reports: bool,
    pub last_login: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Checked against the role list in the handler.
    pub role: String,
    pub phone: Option<String>,
}

/// DTO for profile updates. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email_notifications: Option<bool>,
    pub production_notifications: Option<bool>,
    pub weekly_reports: Option<bool>,
}
