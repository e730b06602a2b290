//! Well-known role name constants and permission checks.
//!
//! Roles are supplied by the upstream identity provider; the API layer
//! threads them into handlers explicitly rather than reading ambient
//! session state.

pub const ROLE_DESIGNER: &str = "designer";
pub const ROLE_ENGINEER: &str = "engineer";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_PRODUCTION: &str = "production";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_DESIGNER,
    ROLE_ENGINEER,
    ROLE_MANAGER,
    ROLE_PRODUCTION,
];

/// Validate that a role string is one of the allowed values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

/// Customers may be edited by managers and engineers.
pub fn can_edit_customers(role: &str) -> bool {
    role == ROLE_MANAGER || role == ROLE_ENGINEER
}

/// Customers may only be deleted by managers.
pub fn can_delete_customers(role: &str) -> bool {
    role == ROLE_MANAGER
}

/// Library templates may be created, edited, and deactivated by
/// engineers and managers.
pub fn can_manage_library(role: &str) -> bool {
    role == ROLE_ENGINEER || role == ROLE_MANAGER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_accepted() {
        for role in VALID_ROLES {
            assert!(validate_role(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let result = validate_role("admin");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid role"));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(validate_role("Manager").is_err());
    }

    #[test]
    fn customer_edit_limited_to_manager_and_engineer() {
        assert!(can_edit_customers(ROLE_MANAGER));
        assert!(can_edit_customers(ROLE_ENGINEER));
        assert!(!can_edit_customers(ROLE_DESIGNER));
        assert!(!can_edit_customers(ROLE_PRODUCTION));
    }

    #[test]
    fn customer_delete_limited_to_manager() {
        assert!(can_delete_customers(ROLE_MANAGER));
        assert!(!can_delete_customers(ROLE_ENGINEER));
    }

    #[test]
    fn library_management_limited_to_engineer_and_manager() {
        assert!(can_manage_library(ROLE_ENGINEER));
        assert!(can_manage_library(ROLE_MANAGER));
        assert!(!can_manage_library(ROLE_DESIGNER));
        assert!(!can_manage_library(ROLE_PRODUCTION));
    }
}
