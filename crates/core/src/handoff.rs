//! Production-handoff checklist gate.
//!
//! Sending a project to production is gated on five confirmations. The
//! UI greys out the send button client-side; this module is the
//! server-side contract.

use serde::{Deserialize, Serialize};

/// The five confirmations required before a production send, in the
/// order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffChecklist {
    pub drawings_finalized: bool,
    pub specifications_verified: bool,
    pub customer_approval_received: bool,
    pub material_list_confirmed: bool,
    pub production_notes_added: bool,
}

impl HandoffChecklist {
    /// A fresh checklist with nothing confirmed, as stored on newly
    /// created projects.
    pub fn unchecked() -> Self {
        Self {
            drawings_finalized: false,
            specifications_verified: false,
            customer_approval_received: false,
            material_list_confirmed: false,
            production_notes_added: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_items().is_empty()
    }

    /// Names of the items still unconfirmed, for the precondition
    /// error message.
    pub fn missing_items(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.drawings_finalized {
            missing.push("drawings_finalized");
        }
        if !self.specifications_verified {
            missing.push("specifications_verified");
        }
        if !self.customer_approval_received {
            missing.push("customer_approval_received");
        }
        if !self.material_list_confirmed {
            missing.push("material_list_confirmed");
        }
        if !self.production_notes_added {
            missing.push("production_notes_added");
        }
        missing
    }
}
