//! Session Identity Store
//!
//! Holds the canonical account id resolved during the current session.
//! The acquisition workflow is the only writer; the retrieval pipeline and
//! presentation code read it. Shared as `Arc<SessionIdentity>`.

use std::sync::RwLock;

use tracing::debug;

use crate::core_types::AccountId;

#[derive(Debug, Default)]
pub struct SessionIdentity {
    resolved: RwLock<Option<AccountId>>,
}

impl SessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly resolved id, replacing any earlier one
    pub fn set_resolved(&self, id: AccountId) {
        debug!(account_id = %id, "Session identity resolved");
        // A poisoned lock only means a reader panicked; the value is still valid.
        let mut guard = self.resolved.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(id);
    }

    /// The id resolved in this session, if any
    pub fn resolved(&self) -> Option<AccountId> {
        self.resolved
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Resolved id, falling back to a caller-provided default
    pub fn effective(&self, fallback: Option<&AccountId>) -> Option<AccountId> {
        self.resolved().or_else(|| fallback.cloned())
    }
}
