//! Project entity model and DTOs.

use castworks_core::handoff::HandoffChecklist;
use castworks_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::drawing::Drawing;
use crate::models::revision::Revision;
use crate::models::rfi::Rfi;
use crate::models::time_entry::TimeEntry;

/// A structure attached to a project (manholes, vaults, pits...).
/// Stored as a JSONB list on the project row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    #[serde(rename = "type")]
    pub structure_type: String,
    pub custom_name: Option<String>,
}

/// A project row from the `projects` table.
///
/// `customer_name` is a snapshot taken at creation; renaming the
/// customer later does not update it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub project_number: String,
    pub project_name: Option<String>,
    pub customer_id: DbId,
    pub customer_name: String,
    pub start_date: Option<NaiveDate>,
    pub product_type: String,
    pub status: String,
    pub structures: Json<Vec<Structure>>,
    pub spec_length: f64,
    pub spec_width: f64,
    pub spec_height: f64,
    pub spec_wall_thickness: Option<f64>,
    pub spec_custom_notes: Option<String>,
    pub total_hours: f64,
    pub sent_to_production: bool,
    pub handoff_date: Option<Timestamp>,
    pub drawings_finalized: bool,
    pub specifications_verified: bool,
    pub customer_approval_received: bool,
    pub material_list_confirmed: bool,
    pub production_notes_added: bool,
    pub created_by: DbId,
    pub assigned_to: Option<DbId>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The production-handoff checklist state of this row.
    pub fn checklist(&self) -> HandoffChecklist {
        HandoffChecklist {
            drawings_finalized: self.drawings_finalized,
            specifications_verified: self.specifications_verified,
            customer_approval_received: self.customer_approval_received,
            material_list_confirmed: self.material_list_confirmed,
            production_notes_added: self.production_notes_added,
        }
    }
}

/// Specification dimensions as submitted on create.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecificationsInput {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub wall_thickness: Option<f64>,
    pub custom_notes: Option<String>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub customer_id: DbId,
    /// Hand-assigned number; allocated from the year sequence when
    /// omitted.
    pub project_number: Option<String>,
    pub project_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub product_type: String,
    pub specifications: SpecificationsInput,
    pub structures: Option<Vec<Structure>>,
}

/// Specification updates. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSpecifications {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub wall_thickness: Option<f64>,
    pub custom_notes: Option<String>,
}

/// Checklist updates. Only the provided items are toggled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateChecklist {
    pub drawings_finalized: Option<bool>,
    pub specifications_verified: Option<bool>,
    pub customer_approval_received: Option<bool>,
    pub material_list_confirmed: Option<bool>,
    pub production_notes_added: Option<bool>,
}

/// DTO for updating an existing project. All fields are optional.
/// Status is deliberately absent: status changes go through the status
/// operation so their side effects always run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub project_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub product_type: Option<String>,
    pub structures: Option<Vec<Structure>>,
    pub specifications: Option<UpdateSpecifications>,
    pub checklist: Option<UpdateChecklist>,
    pub assigned_to: Option<DbId>,
}

/// Identity of an existing project, returned with duplicate-number
/// conflicts so the caller can disambiguate.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub project_number: String,
    pub project_name: Option<String>,
    pub customer_name: String,
}

/// A project with its attached records, as returned by the detail
/// endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub time_entries: Vec<TimeEntry>,
    pub revisions: Vec<Revision>,
    pub drawings: Vec<Drawing>,
    pub rfis: Vec<Rfi>,
}

/// Query parameters for the project list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub product_type: Option<String>,
    pub customer_id: Option<DbId>,
    /// Case-insensitive substring match on project number or customer
    /// name.
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
