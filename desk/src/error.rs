//! Error types for the desk client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    /// The backend could not produce the coin list.
    #[error("Coin list unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Export requested with nothing saved.
    #[error("No saved analyses to export — save at least one coin first")]
    NoData,

    /// No token, or the backend/Google rejected it.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The OAuth callback carried an error marker instead of a token.
    #[error("Google authorization failed: {0}")]
    ExchangeFailed(String),

    /// Durable store unreadable. Recovered by starting empty.
    #[error("Saved analyses are unreadable: {0}")]
    PersistCorrupted(String),

    /// Backend answered with an error body.
    #[error("Backend error (HTTP {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeskError>;
