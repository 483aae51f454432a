//! HTTP surface, all mounted under `/api`.
//!
//! | Method | Path                           | Handler                       |
//! |--------|--------------------------------|-------------------------------|
//! | GET    | `/api/health`                  | [`system::health_check`]      |
//! | GET    | `/api/coins`                   | [`coins::list_coins`]         |
//! | GET    | `/api/coins/:id`               | [`coins::get_coin`]           |
//! | POST   | `/api/reports/generate`        | [`reports::generate_report`]  |
//! | POST   | `/api/reports/upload-to-drive` | [`reports::upload_to_drive`]  |
//! | GET    | `/api/auth/google`             | [`auth::google_auth_url`]     |
//! | GET    | `/api/auth/google/callback`    | [`auth::google_callback`]     |
//! | POST   | `/api/auth/verify-token`       | [`auth::verify_token`]        |

pub mod auth;
pub mod coins;
pub mod reports;
pub mod system;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::state::SharedState;

/// The full application router, middleware included.
pub fn router(state: SharedState) -> Router {
    let api = Router::new()
        // ── Coin Source ───────────────────────────────────────────────────────
        .route("/coins",                   get(coins::list_coins))
        .route("/coins/:id",               get(coins::get_coin))
        // ── Report Exporter ───────────────────────────────────────────────────
        .route("/reports/generate",        post(reports::generate_report))
        .route("/reports/upload-to-drive", post(reports::upload_to_drive))
        // ── Auth Token Flow ───────────────────────────────────────────────────
        .route("/auth/google",             get(auth::google_auth_url))
        .route("/auth/google/callback",    get(auth::google_callback))
        .route("/auth/verify-token",       post(auth::verify_token))
        // ── System ────────────────────────────────────────────────────────────
        .route("/health",                  get(system::health_check));

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/api", api)
        // ── Middleware ────────────────────────────────────────────────────────
        .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn security_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
