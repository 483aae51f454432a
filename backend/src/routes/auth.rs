//! # routes::auth
//!
//! HTTP face of the Auth Token Flow. The backend never stores the token: it
//! hands it to the frontend in the callback redirect and the client keeps it.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};
use url::Url;

use crate::{
    error::AppError,
    google::oauth::{authorization_url, exchange_code, verify_token as verify_with_google},
    state::SharedState,
};

/// Error marker placed in the redirect when the handshake fails.
pub const AUTH_ERROR_MARKER: &str = "Authorization failed";

// ─── GET /api/auth/google ─────────────────────────────────────────────────────

pub async fn google_auth_url(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let auth_url = authorization_url(&state.config.google)?;
    Ok(Json(json!({
        "success": true,
        "authUrl": auth_url,
    })))
}

// ─── GET /api/auth/google/callback ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code:  Option<String>,
    /// Set by Google when the user denies consent
    pub error: Option<String>,
}

pub async fn google_callback(
    State(state): State<SharedState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    if let Some(provider_error) = query.error.as_deref() {
        warn!(provider_error, "Google returned an error to the callback");
        return frontend_redirect(&state.config.frontend_url, ("error", AUTH_ERROR_MARKER));
    }

    let code = query
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Authorization code is missing".into()))?;

    match exchange_code(&state.http_client, &state.config.google, code).await {
        Ok(token) => frontend_redirect(&state.config.frontend_url, ("access_token", token.as_str())),
        Err(e) => {
            error!(error = %e, "authorization code exchange failed");
            frontend_redirect(&state.config.frontend_url, ("error", AUTH_ERROR_MARKER))
        }
    }
}

/// `303` to `<frontend>/auth-callback?<key>=<value>`, value URL-encoded.
fn frontend_redirect(frontend_url: &str, param: (&str, &str)) -> Result<Response, AppError> {
    let target = Url::parse_with_params(&format!("{frontend_url}/auth-callback"), [param])
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid FRONTEND_URL: {e}")))?;
    Ok(Redirect::to(target.as_str()).into_response())
}

// ─── POST /api/auth/verify-token ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(default)]
    pub access_token: Option<String>,
}

pub async fn verify_token(
    State(state): State<SharedState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let token = req
        .access_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Access token is missing".into()))?;

    if verify_with_google(&state.http_client, &state.config.google, token).await {
        Ok((StatusCode::OK, Json(json!({ "success": true, "message": "Token is valid" }))))
    } else {
        Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid access token" })),
        ))
    }
}
