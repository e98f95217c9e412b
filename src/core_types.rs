//! Core types used throughout the system
//!
//! These are fundamental identifiers shared by every module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Game selector - the Steam application id of a game.
///
/// # Usage:
/// - Scopes identity resolution and the inventory existence check
/// - Filters the priced inventory payload (`appid` field)
/// - Part of every item id
pub type GameId = u32;

/// Canonical account id (SteamID64) returned by identity resolution.
///
/// Used for all inventory calls once resolved. Kept as a string because the
/// upstream hands it back as one and never does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Caller context required to start an acquisition run.
///
/// Authentication itself happens elsewhere; the workflow only needs to know
/// that someone is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: u64,
    pub display_name: String,
}

impl UserContext {
    pub fn new(user_id: u64, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}
