//! # state
//!
//! AppState — built once at startup and read-only afterwards, so handlers
//! share it through an `Arc` without any locking.

use std::sync::Arc;

use crate::coins::CoinSource;
use crate::config::Config;

/// Top-level shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,

    /// Coin list parsed from `CRYPTO_LIST`
    pub coins: CoinSource,

    /// reqwest Client shared by every outbound Google call (connection pooling)
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let coins = CoinSource::from_list(&config.crypto_list);
        Self {
            config,
            coins,
            http_client: reqwest::Client::new(),
        }
    }
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: Config) -> SharedState {
    Arc::new(AppState::new(config))
}
