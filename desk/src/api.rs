//! # api — HTTP client for the coinnotes backend
//!
//! One method per backend route the desk uses. Transport failures and error
//! bodies are mapped onto [`DeskError`] here so the controller only deals
//! with the domain taxonomy.

use std::time::Duration;

use reqwest::{header, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{DeskError, Result};
use crate::models::{AnalysisRecord, Coin};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const FALLBACK_REPORT_NAME: &str = "report.csv";

/// `{ success, data?, count?, message? }` envelope used by the backend.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data:    Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUrlResponse {
    success:  bool,
    auth_url: Option<String>,
    message:  Option<String>,
}

/// A CSV report as downloaded from `/reports/generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub bytes:     Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub file_id:   String,
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http:     reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http:     reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // ─── Coin Source ──────────────────────────────────────────────────────────

    /// `GET /coins`. Anything short of a successful listing is
    /// `UpstreamUnavailable`.
    pub async fn fetch_coins(&self) -> Result<Vec<Coin>> {
        let resp = self
            .http
            .get(self.url("/coins"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| DeskError::UpstreamUnavailable(format!("backend unreachable: {e}")))?;

        let status = resp.status();
        let body: Envelope<Vec<Coin>> = resp
            .json()
            .await
            .map_err(|e| DeskError::UpstreamUnavailable(format!("HTTP {status}: {e}")))?;

        if !body.success {
            return Err(DeskError::UpstreamUnavailable(
                body.message.unwrap_or_else(|| format!("HTTP {status}")),
            ));
        }
        let coins = body.data.unwrap_or_default();
        debug!(count = coins.len(), "coins fetched");
        Ok(coins)
    }

    // ─── Report Exporter ──────────────────────────────────────────────────────

    /// `POST /reports/generate` — the CSV bytes plus the server-chosen name.
    pub async fn generate_report(&self, records: &[AnalysisRecord]) -> Result<Report> {
        if records.is_empty() {
            return Err(DeskError::NoData);
        }
        let resp = self
            .http
            .post(self.url("/reports/generate"))
            .json(&json!({ "data": records }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(error_from_response(resp).await);
        }

        let file_name = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| FALLBACK_REPORT_NAME.to_string());
        let bytes = resp.bytes().await?.to_vec();

        info!(file_name = %file_name, bytes = bytes.len(), "📄 report downloaded");
        Ok(Report { file_name, bytes })
    }

    /// `POST /reports/upload-to-drive`.
    pub async fn upload_to_drive(&self, records: &[AnalysisRecord], token: &str) -> Result<UploadReceipt> {
        if records.is_empty() {
            return Err(DeskError::NoData);
        }
        let resp = self
            .http
            .post(self.url("/reports/upload-to-drive"))
            .json(&json!({ "data": records, "accessToken": token }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    // ─── Auth Token Flow ──────────────────────────────────────────────────────

    /// `GET /auth/google` — the consent URL to open in a browser.
    pub async fn auth_url(&self) -> Result<String> {
        let body: AuthUrlResponse = self.get_json("/auth/google").await?;
        match body.auth_url {
            Some(url) if body.success => Ok(url),
            _ => Err(DeskError::Backend {
                status:  200,
                message: body.message.unwrap_or_else(|| "no authUrl in response".into()),
            }),
        }
    }

    /// `POST /auth/verify-token`. Any failure, including an unreachable
    /// backend, reads as "not valid".
    pub async fn verify_token(&self, token: &str) -> bool {
        let result = self
            .http
            .post(self.url("/auth/verify-token"))
            .json(&json!({ "accessToken": token }))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "token verification request failed");
                return false;
            }
        };
        match resp.json::<Envelope<serde_json::Value>>().await {
            Ok(body) => body.success,
            Err(e) => {
                warn!(error = %e, "token verification response unreadable");
                false
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.http.get(self.url(path)).timeout(REQUEST_TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json().await?)
    }
}

/// Map an error response onto the taxonomy, keeping the backend's message.
async fn error_from_response(resp: reqwest::Response) -> DeskError {
    let status = resp.status();
    let message = resp
        .json::<Envelope<serde_json::Value>>()
        .await
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::BAD_REQUEST => DeskError::InvalidInput(message),
        StatusCode::UNAUTHORIZED => DeskError::Unauthorized(message),
        StatusCode::NOT_FOUND => DeskError::NotFound(message),
        _ => DeskError::Backend { status: status.as_u16(), message },
    }
}

/// `attachment; filename="07.03.24.csv"` → `07.03.24.csv`
fn attachment_file_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']))
}
