//! Game catalog and display currency
//!
//! The catalog lists the games the upstream inventory service knows how to
//! price. Unknown app ids are still accepted as selectors; they simply have
//! no display name.

use serde::{Deserialize, Serialize};

use crate::core_types::GameId;

/// A game whose inventory can be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub name: &'static str,
}

pub const CS2: GameId = 730;
pub const DOTA2: GameId = 570;
pub const RUST: GameId = 252490;
pub const TF2: GameId = 440;

/// Game selected when nothing else is configured
pub const DEFAULT_GAME: GameId = CS2;

pub const GAMES: [Game; 4] = [
    Game { id: CS2, name: "CS2" },
    Game {
        id: DOTA2,
        name: "Dota 2",
    },
    Game { id: RUST, name: "Rust" },
    Game { id: TF2, name: "TF2" },
];

/// Look up a catalog entry by app id
pub fn find_game(id: GameId) -> Option<&'static Game> {
    GAMES.iter().find(|g| g.id == id)
}

/// Display name for an app id, falling back to the numeric id
pub fn game_label(id: GameId) -> String {
    find_game(id)
        .map(|g| g.name.to_string())
        .unwrap_or_else(|| format!("app {}", id))
}

/// Active display currency
///
/// `code` selects the entry of the upstream `prices` map, `symbol` is only
/// used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "RUB".to_string(),
            symbol: "₽".to_string(),
        }
    }
}
