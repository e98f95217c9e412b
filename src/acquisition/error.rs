//! Acquisition Error Types
//!
//! Each stage owns one error kind. The coordinator turns them into a step
//! status plus a fixed user-facing message; nothing here escapes `run` as a
//! raw fault.

use thiserror::Error;

use super::state::Stage;
use crate::upstream::UpstreamError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("Identity resolution failed: {0}")]
    IdentityResolutionFailed(UpstreamError),

    #[error("Inventory fetch failed: {0}")]
    InventoryFetchFailed(UpstreamError),

    /// Enrichment stage failure, also used for anything not tied to a stage
    ///
    /// Not produced by the current workflow: stages 2 and 3 make no network
    /// calls, and stage 0/1 failures keep their own kind.
    #[error("Pricing failed: {0}")]
    PricingFailed(String),

    /// A newer run or a reset took over; the old run stops silently
    #[error("Run superseded")]
    Superseded,
}

impl AcquisitionError {
    /// Classify a failure by the stage it happened in
    pub fn at_stage(stage: Stage, err: UpstreamError) -> Self {
        match stage {
            Stage::ResolveIdentity => AcquisitionError::IdentityResolutionFailed(err),
            Stage::FetchInventory => AcquisitionError::InventoryFetchFailed(err),
            Stage::EnrichPrices | Stage::Finalize => AcquisitionError::PricingFailed(err.to_string()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AcquisitionError::IdentityResolutionFailed(_) => "IDENTITY_RESOLUTION_FAILED",
            AcquisitionError::InventoryFetchFailed(_) => "INVENTORY_FETCH_FAILED",
            AcquisitionError::PricingFailed(_) => "PRICING_FAILED",
            AcquisitionError::Superseded => "SUPERSEDED",
        }
    }

    /// Step that is marked as failed
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AcquisitionError::IdentityResolutionFailed(_) => Some(Stage::ResolveIdentity),
            AcquisitionError::InventoryFetchFailed(_) => Some(Stage::FetchInventory),
            AcquisitionError::PricingFailed(_) => Some(Stage::EnrichPrices),
            AcquisitionError::Superseded => None,
        }
    }

    /// Localized diagnostic shown under the failed step
    pub fn user_message(&self) -> &'static str {
        match self {
            AcquisitionError::IdentityResolutionFailed(_) => {
                "Не удалось определить ссылку на ваш профиль, попробуйте позже, или напишите в Поддержку"
            }
            AcquisitionError::InventoryFetchFailed(_) => {
                "Проверьте, не скрыт ли ваш инвентарь в настройках профиля, если инвентарь открыт и в нем есть предметы, напишите в Поддержку"
            }
            AcquisitionError::PricingFailed(_) => {
                "Не удалось определить цены. Попробуйте ещё раз или напишите в Поддержку"
            }
            AcquisitionError::Superseded => "",
        }
    }
}
