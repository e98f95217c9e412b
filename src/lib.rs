//! Inventory Scope - game inventory acquisition and valuation
//!
//! Resolves a Steam profile reference to a canonical account id, loads the
//! priced inventory for a selected game and presents a filterable, sortable,
//! aggregated view with a cart.
//!
//! # Modules
//!
//! - [`core_types`] - Account id, game id and user context
//! - [`games`] - Game catalog and display currency
//! - [`models`] - `InventoryItem`
//! - [`session`] - Session identity store
//! - [`upstream`] - Inventory service trait and HTTP client
//! - [`acquisition`] - Staged identity/inventory workflow
//! - [`retrieval`] - Priced inventory retrieval and enrichment
//! - [`view`] - Dedup, filter, sort and aggregate
//! - [`cart`] - Selection set
//! - [`config`] / [`logging`] - YAML config and tracing setup

// Core types - must be first!
pub mod core_types;

pub mod games;
pub mod models;
pub mod session;

// Upstream boundary
pub mod upstream;

// Workflow and pipeline
pub mod acquisition;
pub mod retrieval;

// Presentation
pub mod cart;
pub mod view;

pub mod config;
pub mod logging;

// Convenient re-exports at crate root
pub use acquisition::{
    AcquisitionCoordinator, AcquisitionError, AcquisitionSnapshot, AcquisitionState, Stage,
};
pub use cart::{ItemLookup, SelectionSet, ToggleOutcome};
pub use config::{AppConfig, ConfigError};
pub use core_types::{AccountId, GameId, UserContext};
pub use models::{InventoryItem, ItemSource};
pub use retrieval::{InventoryFeed, InventoryState, RetrievalError};
pub use session::SessionIdentity;
pub use upstream::{HttpInventoryService, InventoryService, UpstreamError};
pub use view::{InventoryView, ViewFilters};
