//! Upstream wire types
//!
//! The priced inventory feed is loosely typed: numbers sometimes arrive as
//! strings, flags as 0/1, and any field may be missing. Records are decoded
//! into `serde_json::Value` slots and coerced by the helpers below.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::core_types::{AccountId, GameId};

/// Identity resolution response body
#[derive(Debug, Deserialize)]
pub struct IdentityResponse {
    #[serde(alias = "canonicalId", alias = "steamId64")]
    pub steamid64: Value,
}

impl IdentityResponse {
    /// Canonical id, or `None` when the field is empty or not scalar
    pub fn account_id(&self) -> Option<AccountId> {
        let id = match &self.steamid64 {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!id.is_empty()).then(|| AccountId::new(id))
    }
}

/// One entry of the priced inventory payload
///
/// Every field is a raw slot, so a record with an odd field still decodes;
/// only the accessors decide what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub market_hash_name: Value,
    pub icon_url: Value,
    pub appid: Value,
    pub count: Value,
    pub tradable: Value,
    pub marketable: Value,
    pub prices: Value,
}

impl RawRecord {
    /// Item name; anything but a non-empty string leaves the record unidentifiable
    pub fn name(&self) -> Option<&str> {
        self.market_hash_name.as_str().filter(|s| !s.is_empty())
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon_url.as_str().filter(|s| !s.is_empty())
    }

    pub fn app_id(&self) -> Option<GameId> {
        coerce_number(&self.appid)
            .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(GameId::MAX))
            .map(|n| n as GameId)
    }

    /// Price for a currency code; absent, non-numeric or negative is zero
    ///
    /// A `prices` slot that is not an object has no entry for any code.
    pub fn price(&self, currency_code: &str) -> Decimal {
        self.prices
            .as_object()
            .and_then(|p| p.get(currency_code))
            .and_then(coerce_decimal)
            .filter(|d| d.is_sign_positive() && !d.is_zero())
            .unwrap_or(Decimal::ZERO)
    }

    /// Stack size; absent, non-numeric, fractional or below one is one
    pub fn quantity(&self) -> u32 {
        coerce_number(&self.count)
            .filter(|n| *n >= 1.0 && n.fract() == 0.0)
            .map(|n| n.min(f64::from(u32::MAX)) as u32)
            .unwrap_or(1)
    }

    pub fn is_tradable(&self) -> bool {
        coerce_flag(&self.tradable)
    }

    pub fn is_marketable(&self) -> bool {
        coerce_flag(&self.marketable)
    }
}

/// Numeric value of a JSON scalar; numeric strings are accepted
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Exact decimal value of a JSON scalar
///
/// Goes through the textual form so `2.49` stays `2.49` instead of picking up
/// binary float noise.
pub fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Truthiness of a JSON value
///
/// Strings `"0"` and `"false"` count as false, since the feed uses them
/// interchangeably with the numeric forms.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(_) | Value::Object(_) => true,
    }
}
