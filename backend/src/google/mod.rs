//! # google
//!
//! Outbound calls to Google: the OAuth handshake ([`oauth`]) and the Drive
//! upload used for remote report delivery ([`drive`]).
//!
//! Every call uses the shared `reqwest::Client` from `AppState` and a fixed
//! timeout; nothing is retried.

pub mod drive;
pub mod oauth;

use std::time::Duration;

/// Upper bound for any single Google request.
pub const GOOGLE_TIMEOUT: Duration = Duration::from_secs(10);
