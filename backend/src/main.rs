//! # Coinnotes — analysis notes backend
//!
//! ```text
//!  ┌─────────────┐  GET  /api/coins                 ┌──────────────────────┐
//!  │    Desk     │ ───────────────────────────────▶ │ AppState             │
//!  │  (client)   │  POST /api/reports/generate      │ ├─ config            │
//!  └─────────────┘  POST /api/reports/upload-to-…   │ ├─ coins             │
//!        │          GET  /api/auth/google           │ └─ http_client ──────┼──▶ Google
//!        │          POST /api/auth/verify-token     └──────────────────────┘    OAuth / Drive
//!        ▼
//!  browser consent ──▶ GET /api/auth/google/callback ──▶ <frontend>/auth-callback
//! ```

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod coins;
mod config;
mod error;
mod google;
mod models;
mod report;
mod routes;
mod state;

#[cfg(test)]
mod testutil;

use config::Config;
use state::build_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("coinnotes=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!(r#"

  ╔═══════════════════════════════════════════════════════╗
  ║           COINNOTES — Analysis Backend                ║
  ║  Coins · Reports · Google Drive                       ║
  ╚═══════════════════════════════════════════════════════╝"#);

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let addr = config.bind_addr;

    info!(
        environment = %config.environment,
        origins     = ?config.cors_origins,
        frontend    = %config.frontend_url,
        "config loaded"
    );
    if config.google.client_id.is_empty() {
        tracing::warn!("GOOGLE_CLIENT_ID is not set — Drive upload will not work");
    }

    let state = build_state(config);

    // ── 4. Router (CORS, tracing and security headers included) ───────────────
    let app = routes::router(state);

    // ── 5. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 Coinnotes server starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
