//! # coins — Coin Source
//!
//! The fixed, ordered coin list derived from `CRYPTO_LIST`. Parsed once at
//! startup; handlers only read it.

use tracing::{info, warn};

use crate::{error::AppError, models::Coin};

#[derive(Debug, Clone, Default)]
pub struct CoinSource {
    coins: Vec<Coin>,
}

impl CoinSource {
    /// Parse a comma-separated symbol list.
    ///
    /// Blank entries are skipped; a symbol repeated later in the list keeps
    /// only its first position so ids stay unique.
    pub fn from_list(raw: &str) -> Self {
        let mut coins: Vec<Coin> = Vec::new();
        for coin in raw.split(',').filter_map(Coin::from_symbol) {
            if coins.iter().any(|c| c.id == coin.id) {
                warn!(id = %coin.id, "duplicate symbol in CRYPTO_LIST ignored");
                continue;
            }
            coins.push(coin);
        }

        if coins.is_empty() {
            warn!("CRYPTO_LIST is empty — the coin list will be empty");
        } else {
            info!(count = coins.len(), "coin list loaded");
        }

        Self { coins }
    }

    /// The ordered coin list. Empty is a valid answer.
    pub fn list(&self) -> &[Coin] {
        &self.coins
    }

    /// Look up a coin by id (case-insensitive).
    pub fn get(&self, id: &str) -> Result<&Coin, AppError> {
        let id = Coin::normalize_id(id);
        self.coins
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Coin with id {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_configured_order() {
        let source = CoinSource::from_list("BTC,eth, Sol ");
        let ids: Vec<&str> = source.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "eth", "sol"]);
        assert_eq!(source.list()[2].name, "SOL");
    }

    #[test]
    fn blanks_and_duplicates_are_dropped() {
        let source = CoinSource::from_list("btc,,BTC, ,eth,");
        let ids: Vec<&str> = source.list().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "eth"]);
    }

    #[test]
    fn empty_list_is_not_an_error() {
        assert!(CoinSource::from_list("").list().is_empty());
    }

    #[test]
    fn get_is_case_insensitive() {
        let source = CoinSource::from_list("btc,eth");
        assert_eq!(source.get("ETH").unwrap().name, "ETH");
        assert!(matches!(source.get("doge"), Err(AppError::NotFound(_))));
    }
}
