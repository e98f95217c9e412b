use thiserror::Error;

use crate::upstream::UpstreamError;

/// Failure of the priced inventory retrieval
///
/// Local to the retrieval pipeline; the acquisition workflow has its own
/// taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Failed to fetch inventory: {0}")]
    Upstream(#[from] UpstreamError),
}

impl RetrievalError {
    pub fn code(&self) -> &'static str {
        match self {
            RetrievalError::Upstream(e) if e.is_transport() => "RETRIEVAL_TRANSPORT",
            RetrievalError::Upstream(_) => "RETRIEVAL_REJECTED",
        }
    }

    /// Fixed diagnostic shown in place of the inventory grid
    pub fn user_message(&self) -> &'static str {
        "Не удалось загрузить инвентарь"
    }
}
