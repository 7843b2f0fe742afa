use crate::inventory::domain::{ActionKind, ActionOutcome, SoftwareRecord};
use uuid::Uuid;

/// ActionRequest - request to install, uninstall or update a record by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    /// Record name, matched case-insensitively
    pub name: String,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// ActionResponse - terminal outcome of an action and the record it changed
#[derive(Debug, Clone)]
pub struct ActionResponse {
    pub action_id: Uuid,
    pub kind: ActionKind,
    pub outcome: ActionOutcome,
    /// The target record, updated when the action succeeded
    pub record: SoftwareRecord,
}
