//! Inventory Retrieval & Enrichment Pipeline
//!
//! Pulls the priced inventory for the resolved account, keeps the records
//! of the selected game and normalizes them into [`InventoryItem`]s.
//!
//! Re-fetching is explicit: call [`InventoryFeed::load`] (or `refresh`)
//! whenever the account or the game changes. The returned
//! [`RetrievalHandle`] cancels the request; the feed additionally cancels
//! the previous retrieval itself and drops any result that arrives for a
//! superseded generation.
//!
//! [`InventoryItem`]: crate::models::InventoryItem

pub mod enrich;
pub mod error;
pub mod feed;
mod integration_tests;

pub use enrich::{EnrichOptions, enrich};
pub use error::RetrievalError;
pub use feed::{InventoryFeed, InventoryState, RetrievalHandle, load_inventory};
