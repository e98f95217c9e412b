//! Upstream Services
//!
//! Clients for the external identity and inventory services. Everything the
//! workflow and the retrieval pipeline need from the network goes through the
//! [`InventoryService`] trait, so both can be driven by a mock in tests.
//!
//! | Call | Endpoint |
//! |---|---|
//! | resolve identity | `GET {base}/{game}/steamid?text={profile}` |
//! | inventory existence check | `GET {base}/inventory/{account}/{game}` |
//! | priced inventory | `GET {base}/getjsoninv/{account}` |

pub mod error;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use error::UpstreamError;
pub use http::HttpInventoryService;
#[cfg(test)]
pub use mock::MockInventoryService;
pub use types::{IdentityResponse, RawRecord};

use async_trait::async_trait;

use crate::core_types::{AccountId, GameId};

/// Contract of the external identity and inventory services
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Service name for logging
    fn name(&self) -> &'static str;

    /// Resolve a free-text profile reference (URL, vanity name, id) to the
    /// canonical account id
    async fn resolve_identity(
        &self,
        game: GameId,
        profile_reference: &str,
    ) -> Result<AccountId, UpstreamError>;

    /// Confirm the account's inventory for a game is reachable
    ///
    /// The response body carries nothing the caller uses.
    async fn check_inventory(&self, account: &AccountId, game: GameId)
    -> Result<(), UpstreamError>;

    /// Fetch every priced record of the account, across all games
    async fn fetch_priced_inventory(
        &self,
        account: &AccountId,
    ) -> Result<Vec<RawRecord>, UpstreamError>;
}
