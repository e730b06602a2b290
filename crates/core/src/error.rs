use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation. Carries one message per failing field,
    /// never just the first.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A business-rule gate was not met (e.g. incomplete handoff
    /// checklist before a production send).
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a single-message validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(vec![msg.into()])
    }
}
