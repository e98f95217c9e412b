//! Raw record normalization
//!
//! Turns upstream records into [`InventoryItem`]s for one game and one
//! currency. Pure; no I/O.

use tracing::debug;

use crate::core_types::GameId;
use crate::models::{InventoryItem, ItemSource};
use crate::upstream::RawRecord;

/// Settings that shape every enriched item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Key of the upstream `prices` map
    pub currency_code: String,
    /// Prefix for `icon_url`
    pub image_base_url: String,
}

impl EnrichOptions {
    pub fn new(currency_code: impl Into<String>, image_base_url: impl Into<String>) -> Self {
        Self {
            currency_code: currency_code.into(),
            image_base_url: image_base_url.into(),
        }
    }

    fn image_url(&self, icon_url: Option<&str>) -> String {
        match icon_url {
            Some(icon) => format!(
                "{}/{}/360fx240f",
                self.image_base_url.trim_end_matches('/'),
                icon
            ),
            None => String::new(),
        }
    }
}

/// Keep the records of `game` and normalize each into an item
///
/// Records without a `market_hash_name` cannot be identified and are dropped.
/// Input order is preserved; duplicates are left for the view to collapse.
pub fn enrich(records: &[RawRecord], game: GameId, options: &EnrichOptions) -> Vec<InventoryItem> {
    let items: Vec<InventoryItem> = records
        .iter()
        .filter(|r| r.app_id() == Some(game))
        .filter_map(|r| enrich_record(r, game, options))
        .collect();

    debug!(
        game,
        raw = records.len(),
        enriched = items.len(),
        "Enriched inventory records"
    );
    items
}

fn enrich_record(record: &RawRecord, game: GameId, options: &EnrichOptions) -> Option<InventoryItem> {
    let name = record.name()?.to_string();
    let price = record.price(&options.currency_code);

    Some(InventoryItem {
        id: InventoryItem::make_id(&name, game),
        image: options.image_url(record.icon()),
        name,
        base_price: price,
        market_price: price,
        quantity: record.quantity(),
        source: ItemSource::Steam,
        tradable: record.is_tradable(),
        marketable: record.is_marketable(),
        app_id: game,
        in_cart: false,
    })
}
