//! Product, structure, and library-category string domains, plus
//! specification dimension validation.

/// Product types a project can be for.
pub const VALID_PRODUCT_TYPES: &[&str] = &["storm", "sanitary", "electrical", "meter"];

/// Structure types that can be attached to a project. The multi-word
/// names are stored verbatim, matching the catalog labels.
pub const VALID_STRUCTURE_TYPES: &[&str] = &[
    "SSMH",
    "SDMH",
    "Inlets",
    "Vaults",
    "Meter Pits",
    "Air Vacuum Pits",
];

/// Library template categories: the four product types plus rebar and
/// CAD template libraries.
pub const VALID_LIBRARY_CATEGORIES: &[&str] =
    &["storm", "sanitary", "electrical", "meter", "rebar", "cad"];

/// Validate that a product type is one of the allowed values.
pub fn validate_product_type(product_type: &str) -> Result<(), String> {
    if VALID_PRODUCT_TYPES.contains(&product_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid product type '{product_type}'. Must be one of: {}",
            VALID_PRODUCT_TYPES.join(", ")
        ))
    }
}

/// Validate that a structure type is one of the allowed values.
pub fn validate_structure_type(structure_type: &str) -> Result<(), String> {
    if VALID_STRUCTURE_TYPES.contains(&structure_type) {
        Ok(())
    } else {
        Err(format!(
            "Invalid structure type '{structure_type}'. Must be one of: {}",
            VALID_STRUCTURE_TYPES.join(", ")
        ))
    }
}

/// Validate that a library category is one of the allowed values.
pub fn validate_library_category(category: &str) -> Result<(), String> {
    if VALID_LIBRARY_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(format!(
            "Invalid product category '{category}'. Must be one of: {}",
            VALID_LIBRARY_CATEGORIES.join(", ")
        ))
    }
}

/// Validate a length/width/height/wall-thickness set, collecting every
/// failing field rather than stopping at the first.
///
/// `field_prefix` names the enclosing object in the error messages
/// (`"specifications."` for projects, `"dimensions."` for library
/// templates). Length, width, and height must be strictly positive;
/// wall thickness is optional but must be strictly positive when
/// present.
pub fn validate_dimensions(
    field_prefix: &str,
    length: f64,
    width: f64,
    height: f64,
    wall_thickness: Option<f64>,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if !(length > 0.0) {
        errors.push(format!("{field_prefix}length must be positive"));
    }
    if !(width > 0.0) {
        errors.push(format!("{field_prefix}width must be positive"));
    }
    if !(height > 0.0) {
        errors.push(format!("{field_prefix}height must be positive"));
    }
    if let Some(wall) = wall_thickness {
        if !(wall > 0.0) {
            errors.push(format!("{field_prefix}wall_thickness must be positive"));
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
