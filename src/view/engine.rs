//! Inventory view computation
//!
//! `InventoryView::build` is a pure function of the enriched collection and
//! the selectors: dedup, filter, aggregate, then sort. Nothing is cached
//! between builds; every selector change rebuilds from scratch.

use std::cmp::Ordering;
use std::collections::HashSet;

use feruca::{Collator, Locale, Tailoring};
use rust_decimal::Decimal;
use serde::Serialize;

use super::filters::{SortKey, ViewFilters};
use crate::cart::{ItemLookup, SelectionSet};
use crate::models::InventoryItem;
use crate::retrieval::InventoryState;

/// Shown instead of the grid when there is nothing to display
pub const EMPTY_PLACEHOLDER: &str =
    "Инвентарь пуст или не удалось загрузить предметы для выбранной игры.";

/// Shown on items whose price could not be determined
pub const PRICE_UNKNOWN_HINT: &str = "Не удалось определить цену.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTotals {
    pub total_items: u64,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    items: Vec<InventoryItem>,
    totals: ViewTotals,
}

impl InventoryView {
    pub fn build(items: &[InventoryItem], filters: &ViewFilters) -> Self {
        let unique = dedup(items);
        let filtered: Vec<InventoryItem> = unique
            .into_iter()
            .filter(|item| filters.keep(item))
            .cloned()
            .collect();

        let totals = aggregate(&filtered);
        let mut items = filtered;
        sort_items(&mut items, filters.sort);

        Self { items, totals }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn totals(&self) -> ViewTotals {
        self.totals
    }

    pub fn total_items(&self) -> u64 {
        self.totals.total_items
    }

    pub fn total_value(&self) -> Decimal {
        self.totals.total_value
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The materialized record currently on display under `id`
    pub fn displayed_item(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Reflect cart membership on the displayed records
    pub fn mark_selected(&mut self, selection: &SelectionSet) {
        for item in &mut self.items {
            item.in_cart = selection.contains(&item.id);
        }
    }

    /// Placeholder for a retrieval state, if the grid should not render
    ///
    /// Decided on the raw collection, so a filter that hides everything still
    /// renders an empty grid rather than the placeholder.
    pub fn placeholder(state: &InventoryState) -> Option<&'static str> {
        if state.error.is_some() || state.items.is_empty() {
            Some(EMPTY_PLACEHOLDER)
        } else {
            None
        }
    }
}

impl ItemLookup for InventoryView {
    fn displayed_item(&self, id: &str) -> Option<&InventoryItem> {
        InventoryView::displayed_item(self, id)
    }
}

/// First occurrence of each id, relative order kept
pub fn dedup(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(item.id.as_str()))
        .collect()
}

pub fn aggregate(items: &[InventoryItem]) -> ViewTotals {
    items.iter().fold(ViewTotals::default(), |acc, item| ViewTotals {
        total_items: acc.total_items + u64::from(item.effective_quantity()),
        total_value: acc.total_value + item.line_total(),
    })
}

/// Stable sort; equal keys keep their input order
pub fn sort_items(items: &mut [InventoryItem], key: SortKey) {
    match key {
        SortKey::PriceAsc => items.sort_by(|a, b| a.market_price.cmp(&b.market_price)),
        SortKey::PriceDesc => items.sort_by(|a, b| b.market_price.cmp(&a.market_price)),
        SortKey::QuantityAsc => items.sort_by_key(|i| i.effective_quantity()),
        SortKey::QuantityDesc => {
            items.sort_by(|a, b| b.effective_quantity().cmp(&a.effective_quantity()))
        }
        SortKey::NameAsc => {
            let mut collator = name_collator();
            items.sort_by(|a, b| collate_names(&mut collator, &a.name, &b.name))
        }
        SortKey::NameDesc => {
            let mut collator = name_collator();
            items.sort_by(|a, b| collate_names(&mut collator, &b.name, &a.name))
        }
        SortKey::Unsorted => {}
    }
}

/// Locale-aware name order (Unicode collation, root locale)
///
/// Names the collator considers equal fall back to code point order, so the
/// result is a total order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collate_names(&mut name_collator(), a, b)
}

/// Root-locale collator; symbols and punctuation keep their weight
fn name_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, false)
}

fn collate_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}
