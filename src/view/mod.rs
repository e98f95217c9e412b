//! Inventory View Engine
//!
//! Derives what the inventory page shows from the enriched collection:
//!
//! ```text
//! items ──▶ dedup(id) ──▶ filter(source ∧ tradability ∧ category) ──┬──▶ sort ──▶ items()
//!                                                                   └──▶ aggregate ──▶ totals()
//! ```
//!
//! Totals are computed over the filtered set before sorting, so they do not
//! depend on the sort key.

pub mod engine;
pub mod filters;

pub use engine::{
    EMPTY_PLACEHOLDER, InventoryView, PRICE_UNKNOWN_HINT, ViewTotals, aggregate, compare_names,
    dedup, sort_items,
};
pub use filters::{CategoryFilter, SortKey, SourceFilter, TradabilityFilter, ViewFilters};
