//! # models::coin
//!
//! Defines [`Coin`], one entry of the configured symbol list.

use serde::{Deserialize, Serialize};

/// A tracked cryptocurrency.
///
/// `id` and `symbol` are the lower-cased configured symbol, `name` is the
/// upper-cased one. `id` is the store key on the desk side, so it must stay
/// stable for a given configured symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id:     String,
    pub symbol: String,
    pub name:   String,
}

impl Coin {
    /// Build a coin from a raw configured symbol such as `" Btc "`.
    /// Returns `None` for a blank entry.
    pub fn from_symbol(raw: &str) -> Option<Self> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return None;
        }
        let lower = symbol.to_lowercase();
        Some(Self {
            id:     lower.clone(),
            symbol: lower,
            name:   symbol.to_uppercase(),
        })
    }

    /// Normalise a user/URL supplied id the same way [`Coin::from_symbol`] does.
    #[inline]
    pub fn normalize_id(id: &str) -> String {
        id.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_symbol_normalises_case() {
        let coin = Coin::from_symbol(" Btc ").unwrap();
        assert_eq!(coin.id, "btc");
        assert_eq!(coin.symbol, "btc");
        assert_eq!(coin.name, "BTC");
    }

    #[test]
    fn blank_symbol_is_rejected() {
        assert!(Coin::from_symbol("   ").is_none());
    }
}
