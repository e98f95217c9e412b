//! View selectors
//!
//! Selector values arrive as the strings used by the filter menus
//! (`all`, `trade`, `marketrable`, `price-desc`, ...). Parsing never fails:
//! an unrecognized value maps to the "other" side of a binary filter, and an
//! unknown sort key leaves the order untouched.

use std::fmt;
use std::str::FromStr;

use crate::models::{InventoryItem, ItemSource};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Only(ItemSource),
}

impl SourceFilter {
    pub fn keep(&self, item: &InventoryItem) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Only(source) => item.source == *source,
        }
    }
}

impl FromStr for SourceFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => SourceFilter::All,
            other => SourceFilter::Only(other.parse()?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradabilityFilter {
    All,
    #[default]
    Tradable,
    NonTradable,
}

impl TradabilityFilter {
    pub fn keep(&self, item: &InventoryItem) -> bool {
        match self {
            TradabilityFilter::All => true,
            TradabilityFilter::Tradable => item.tradable,
            TradabilityFilter::NonTradable => !item.tradable,
        }
    }
}

impl FromStr for TradabilityFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => TradabilityFilter::All,
            "trade" => TradabilityFilter::Tradable,
            _ => TradabilityFilter::NonTradable,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    All,
    #[default]
    Marketable,
    NonMarketable,
}

impl CategoryFilter {
    pub fn keep(&self, item: &InventoryItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Marketable => item.marketable,
            CategoryFilter::NonMarketable => !item.marketable,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "marketrable" is the spelling the filter menu has always sent
        Ok(match s {
            "all" => CategoryFilter::All,
            "marketrable" | "marketable" => CategoryFilter::Marketable,
            _ => CategoryFilter::NonMarketable,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    PriceAsc,
    #[default]
    PriceDesc,
    QuantityAsc,
    QuantityDesc,
    NameAsc,
    NameDesc,
    /// Unknown selector: keep input order
    Unsorted,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::QuantityAsc,
        SortKey::QuantityDesc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::QuantityAsc => "quantity-asc",
            SortKey::QuantityDesc => "quantity-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::Unsorted => "none",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .unwrap_or(SortKey::Unsorted))
    }
}

/// The four selectors of the inventory page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilters {
    pub source: SourceFilter,
    pub tradability: TradabilityFilter,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl ViewFilters {
    /// Everything visible, input order
    pub fn permissive() -> Self {
        Self {
            source: SourceFilter::All,
            tradability: TradabilityFilter::All,
            category: CategoryFilter::All,
            sort: SortKey::Unsorted,
        }
    }

    /// Build from raw selector strings
    pub fn from_selectors(source: &str, tradability: &str, category: &str, sort: &str) -> Self {
        // Infallible parses
        let parse_source = source.parse().unwrap_or_default();
        let parse_trade = tradability.parse().unwrap_or_default();
        let parse_category = category.parse().unwrap_or_default();
        let parse_sort = sort.parse().unwrap_or_default();
        Self {
            source: parse_source,
            tradability: parse_trade,
            category: parse_category,
            sort: parse_sort,
        }
    }

    /// All three filters pass
    pub fn keep(&self, item: &InventoryItem) -> bool {
        self.source.keep(item) && self.tradability.keep(item) && self.category.keep(item)
    }
}
