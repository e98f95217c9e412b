//! Inventory item model
//!
//! `InventoryItem` is produced by the enrichment step from raw upstream
//! records and then only read, apart from the session-local `in_cart` flag.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::GameId;

/// Where an item is held
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    Steam,
    #[serde(untagged)]
    Other(String),
}

impl ItemSource {
    pub fn as_str(&self) -> &str {
        match self {
            ItemSource::Steam => "steam",
            ItemSource::Other(name) => name,
        }
    }
}

impl fmt::Display for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "steam" => ItemSource::Steam,
            other => ItemSource::Other(other.to_string()),
        })
    }
}

/// One unique item entry in a user's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// `"{name}-{app_id}"`, the dedup and selection key
    pub id: String,
    pub name: String,
    pub image: String,
    /// Unit price in the active currency
    pub base_price: Decimal,
    /// Display unit price; zero means the price is unknown
    pub market_price: Decimal,
    pub quantity: u32,
    pub source: ItemSource,
    pub tradable: bool,
    pub marketable: bool,
    pub app_id: GameId,
    pub in_cart: bool,
}

impl InventoryItem {
    /// Build the identity key for an item name within a game
    pub fn make_id(name: &str, app_id: GameId) -> String {
        format!("{}-{}", name, app_id)
    }

    /// Quantity as used by every aggregate, never below one
    #[inline]
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    #[inline]
    pub fn has_known_price(&self) -> bool {
        !self.market_price.is_zero()
    }

    /// Whether the presentation layer should offer the cart action
    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.has_known_price()
    }

    /// `market_price * quantity`
    pub fn line_total(&self) -> Decimal {
        self.market_price * Decimal::from(self.effective_quantity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: u32) -> InventoryItem {
        InventoryItem {
            id: InventoryItem::make_id("AK-47 | Redline", 730),
            name: "AK-47 | Redline".to_string(),
            image: String::new(),
            base_price: Decimal::new(price, 0),
            market_price: Decimal::new(price, 0),
            quantity,
            source: ItemSource::Steam,
            tradable: true,
            marketable: true,
            app_id: 730,
            in_cart: false,
        }
    }

    #[test]
    fn test_make_id() {
        assert_eq!(InventoryItem::make_id("Case Key", 440), "Case Key-440");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(10, 3).line_total(), Decimal::new(30, 0));
        assert_eq!(item(10, 0).line_total(), Decimal::new(10, 0));
    }

    #[test]
    fn test_zero_price_not_selectable() {
        assert!(!item(0, 1).is_selectable());
        assert!(item(1, 1).is_selectable());
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("steam".parse::<ItemSource>().unwrap(), ItemSource::Steam);
        assert_eq!(
            "market".parse::<ItemSource>().unwrap(),
            ItemSource::Other("market".to_string())
        );
        assert_eq!(ItemSource::Steam.to_string(), "steam");
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let json = serde_json::to_value(item(5, 1)).unwrap();
        assert_eq!(json["marketPrice"], "5");
        assert_eq!(json["source"], "steam");
        assert_eq!(json["appId"], 730);
    }
}
