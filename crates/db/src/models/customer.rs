//! Customer entity model and DTOs.
//!
//! The project-history counters on this row (`total_projects`,
//! `active_projects`, `recent_project_ids`) are owned by project
//! lifecycle operations; no endpoint edits them directly.
//! `completed_this_year` is carried for data-shape compatibility and is
//! not maintained.

use castworks_core::contact::{PHONE_RE, ZIP_CODE_RE};
use castworks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A customer row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub custom_specs: Json<Vec<String>>,
    pub preferred_products: Json<Vec<String>>,
    pub notes: String,
    pub requires_stamped_drawings: bool,
    pub expedited_turnaround: bool,
    pub total_projects: i64,
    pub active_projects: i64,
    pub completed_this_year: i64,
    pub recent_project_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Contact block of the customer intake form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactInfoInput {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone format (xxx) xxx-xxxx"))]
    pub phone: String,
    #[validate(nested)]
    pub address: Option<AddressInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    #[validate(length(equal = 2, message = "State must be 2 characters"))]
    pub state: Option<String>,
    #[validate(regex(path = *ZIP_CODE_RE, message = "Invalid zip code"))]
    pub zip_code: Option<String>,
}

/// Preferences block of the customer intake form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesInput {
    pub custom_specs: Option<Vec<String>>,
    pub notes: Option<String>,
    pub preferred_products: Option<Vec<String>>,
    pub requires_stamped_drawings: Option<bool>,
    pub expedited_turnaround: Option<bool>,
}

/// DTO for creating a new customer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomer {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(nested)]
    pub contact_info: ContactInfoInput,
    pub preferences: Option<PreferencesInput>,
}

/// Contact block for updates. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateContactInfo {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone format (xxx) xxx-xxxx"))]
    pub phone: Option<String>,
    #[validate(nested)]
    pub address: Option<AddressInput>,
}

/// DTO for updating an existing customer. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomer {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(nested)]
    pub contact_info: Option<UpdateContactInfo>,
    pub preferences: Option<PreferencesInput>,
}
