//! # google::oauth — Auth Token Flow
//!
//! Three independent steps, no state kept between them:
//!
//! ```text
//! authorization_url()  ──▶ browser consents ──▶ /auth/google/callback?code=…
//!                                                   │
//!                          exchange_code(code) ◀────┘
//!                                │
//!                                ▼
//!                         access token ──▶ verify_token() / Drive upload
//! ```

use serde::Deserialize;
use tracing::{error, info, warn};
use url::Url;

use super::GOOGLE_TIMEOUT;
use crate::{config::GoogleConfig, error::AppError};

/// Drive access limited to files this app creates.
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// Build the consent URL. Always asks for offline access and always forces
/// the consent screen, so repeated calls produce the same URL.
pub fn authorization_url(google: &GoogleConfig) -> Result<String, AppError> {
    let url = Url::parse_with_params(
        &google.auth_url,
        &[
            ("client_id",     google.client_id.as_str()),
            ("redirect_uri",  google.redirect_uri.as_str()),
            ("response_type", "code"),
            ("access_type",   "offline"),
            ("scope",         DRIVE_FILE_SCOPE),
            ("prompt",        "consent"),
        ],
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid GOOGLE_AUTH_URL: {e}")))?;

    Ok(url.into())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in:   Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Swap a one-time authorization code for an access token.
///
/// Any failure (transport, non-2xx, unexpected body) is `ExchangeFailed`.
pub async fn exchange_code(
    client: &reqwest::Client,
    google: &GoogleConfig,
    code: &str,
) -> Result<String, AppError> {
    let response = client
        .post(&google.token_url)
        .form(&[
            ("code",          code),
            ("client_id",     google.client_id.as_str()),
            ("client_secret", google.client_secret.as_str()),
            ("redirect_uri",  google.redirect_uri.as_str()),
            ("grant_type",    "authorization_code"),
        ])
        .timeout(GOOGLE_TIMEOUT)
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, "Google token endpoint unreachable");
            AppError::ExchangeFailed(format!("token endpoint unreachable: {e}"))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let reason = serde_json::from_str::<TokenErrorResponse>(&body)
            .map(|e| match e.error_description {
                Some(desc) => format!("{}: {desc}", e.error),
                None => e.error,
            })
            .unwrap_or(body);
        error!(http_status = %status, reason = %reason, "Google rejected authorization code");
        return Err(AppError::ExchangeFailed(format!("HTTP {status}: {reason}")));
    }

    let token: TokenResponse = response.json().await.map_err(|e| {
        error!(error = %e, "token response parse failed");
        AppError::ExchangeFailed(format!("token response parse error: {e}"))
    })?;

    info!(expires_in = ?token.expires_in, "🔑 authorization code exchanged");
    Ok(token.access_token)
}

/// Minimal authenticated Drive call. `false` on any failure, never an error.
pub async fn verify_token(client: &reqwest::Client, google: &GoogleConfig, token: &str) -> bool {
    let url = format!("{}/drive/v3/about", google.api_base);

    let result = client
        .get(&url)
        .query(&[("fields", "user")])
        .bearer_auth(token)
        .timeout(GOOGLE_TIMEOUT)
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => true,
        Ok(resp) => {
            warn!(http_status = %resp.status(), "access token rejected by Drive");
            false
        }
        Err(e) => {
            warn!(error = %e, "token verification request failed");
            false
        }
    }
}
