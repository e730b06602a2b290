//! Library template model and DTOs.

use castworks_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A template row from the `library_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LibraryTemplate {
    pub id: DbId,
    pub template_name: String,
    pub product_category: String,
    pub dim_length: f64,
    pub dim_width: f64,
    pub dim_height: f64,
    pub dim_wall_thickness: Option<f64>,
    pub design_load: Option<String>,
    pub soil_cover: Option<String>,
    pub water_table: Option<String>,
    pub rebar_schedule: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub usage_count: i64,
    pub last_used: Option<Timestamp>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Template dimensions as submitted on create.
#[derive(Debug, Clone, Deserialize)]
pub struct DimensionsInput {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub wall_thickness: Option<f64>,
}

/// Load requirements block of the template form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadRequirementsInput {
    pub design_load: Option<String>,
    pub soil_cover: Option<String>,
    pub water_table: Option<String>,
}

/// DTO for creating a new library template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLibraryTemplate {
    #[validate(length(min = 2, message = "Template name is required"))]
    pub template_name: String,
    /// Checked against the category list in the handler.
    pub product_category: String,
    pub dimensions: DimensionsInput,
    pub load_requirements: Option<LoadRequirementsInput>,
    pub rebar_schedule: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing template. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLibraryTemplate {
    #[validate(length(min = 2, message = "Template name is required"))]
    pub template_name: Option<String>,
    pub product_category: Option<String>,
    pub dimensions: Option<UpdateDimensions>,
    pub load_requirements: Option<LoadRequirementsInput>,
    pub rebar_schedule: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Dimension updates. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub wall_thickness: Option<f64>,
}

/// Query parameters for the template list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateListParams {
    pub category: Option<String>,
    /// `false` includes deactivated templates; defaults to active only.
    pub active: Option<bool>,
}
