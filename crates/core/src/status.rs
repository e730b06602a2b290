//! Project status domain and lifecycle side-effect rules.
//!
//! Statuses form a nominal progression (requested -> inprogress ->
//! review -> approved -> production) but transitions are free-form: any
//! status may be assigned from any other. The only edges with side
//! effects are the ones crossing the `production` boundary, which drive
//! the customer's `active_projects` counter and the production-handoff
//! flags.

pub const STATUS_REQUESTED: &str = "requested";
pub const STATUS_IN_PROGRESS: &str = "inprogress";
pub const STATUS_REVIEW: &str = "review";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_PRODUCTION: &str = "production";

/// All valid project statuses, in nominal workflow order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_REQUESTED,
    STATUS_IN_PROGRESS,
    STATUS_REVIEW,
    STATUS_APPROVED,
    STATUS_PRODUCTION,
];

/// Validate that a status string is one of the allowed values.
pub fn validate_status(status: &str) -> Result<(), String> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        ))
    }
}

/// A project counts toward its customer's `active_projects` while it is
/// anywhere short of production.
pub fn is_active(status: &str) -> bool {
    status != STATUS_PRODUCTION
}

/// Whether a transition must clear the production-handoff flags
/// (`sent_to_production`, `handoff_date`). Only leaving `production`
/// does.
pub fn clears_handoff(old_status: &str, new_status: &str) -> bool {
    old_status == STATUS_PRODUCTION && new_status != STATUS_PRODUCTION
}

/// The `active_projects` adjustment a status transition implies for the
/// owning customer: -1 entering production, +1 leaving it, 0 otherwise.
/// The repository clamps the counter at zero when applying.
pub fn active_projects_delta(old_status: &str, new_status: &str) -> i64 {
    match (is_active(old_status), is_active(new_status)) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}
