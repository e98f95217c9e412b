//! Selection Set (cart)
//!
//! Holds independent copies of the items the user picked. A toggle adds the
//! record currently on display or removes the one already held; ids that are
//! not on display are ignored.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::InventoryItem;

/// Source of the displayed records a toggle copies from
pub trait ItemLookup {
    fn displayed_item(&self, id: &str) -> Option<&InventoryItem>;
}

impl ItemLookup for [InventoryItem] {
    fn displayed_item(&self, id: &str) -> Option<&InventoryItem> {
        self.iter().find(|item| item.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Id not on display; nothing changed
    Missed,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    items: Vec<InventoryItem>,
    open: bool,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str, lookup: &(impl ItemLookup + ?Sized)) -> ToggleOutcome {
        if let Some(pos) = self.items.iter().position(|item| item.id == id) {
            self.items.remove(pos);
            info!(id, selected = self.items.len(), "Removed from cart");
            return ToggleOutcome::Removed;
        }

        match lookup.displayed_item(id) {
            Some(item) => {
                let mut copy = item.clone();
                copy.in_cart = true;
                self.items.push(copy);
                info!(id, selected = self.items.len(), "Added to cart");
                ToggleOutcome::Added
            }
            None => {
                debug!(id, "Toggle ignored, item not displayed");
                ToggleOutcome::Missed
            }
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn total_value(&self) -> Decimal {
        self.items.iter().map(InventoryItem::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemSource;

    fn item(name: &str, price: i64, quantity: u32) -> InventoryItem {
        InventoryItem {
            id: InventoryItem::make_id(name, 730),
            name: name.to_string(),
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

    fn displayed() -> Vec<InventoryItem> {
        vec![item("a", 10, 2), item("b", 5, 1), item("c", 1, 1)]
    }

    #[test]
    fn test_toggle_adds_copy() {
        let shown = displayed();
        let mut cart = SelectionSet::new();

        assert_eq!(cart.toggle("b-730", shown.as_slice()), ToggleOutcome::Added);
        assert!(cart.contains("b-730"));
        assert!(cart.items()[0].in_cart);
        assert!(!shown[1].in_cart);
    }

    #[test]
    fn test_toggle_twice_removes() {
        let shown = displayed();
        let mut cart = SelectionSet::new();
        cart.toggle("a-730", shown.as_slice());
        assert_eq!(cart.toggle("a-730", shown.as_slice()), ToggleOutcome::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_preserves_order() {
        let shown = displayed();
        let mut cart = SelectionSet::new();
        for id in ["a-730", "b-730", "c-730"] {
            cart.toggle(id, shown.as_slice());
        }
        cart.toggle("b-730", shown.as_slice());
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a-730", "c-730"]);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let shown = displayed();
        let mut cart = SelectionSet::new();
        cart.toggle("a-730", shown.as_slice());

        assert_eq!(cart.toggle("zzz-730", shown.as_slice()), ToggleOutcome::Missed);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_removal_does_not_need_display() {
        let shown = displayed();
        let mut cart = SelectionSet::new();
        cart.toggle("a-730", shown.as_slice());

        let empty: Vec<InventoryItem> = Vec::new();
        assert_eq!(cart.toggle("a-730", empty.as_slice()), ToggleOutcome::Removed);
    }

    #[test]
    fn test_total_and_panel_state() {
        let shown = displayed();
        let mut cart = SelectionSet::new();
        cart.toggle("a-730", shown.as_slice());
        cart.toggle("b-730", shown.as_slice());
        assert_eq!(cart.total_value(), Decimal::new(25, 0));

        assert!(!cart.is_open());
        cart.set_open(true);
        assert!(cart.is_open());

        cart.clear();
        assert_eq!(cart.total_value(), Decimal::ZERO);
    }
}
