//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  Axum's `IntoResponse` impl
//! converts these into `{ "success": false, "message": ... }` bodies so the
//! desk client always gets a machine-readable response even on failure.
//! In development the underlying detail is attached as `error`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::config::is_development;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request payload was syntactically correct but semantically invalid.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown coin id (or any other missing resource).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Report export was asked for with no analyses to write.
    #[error("No analysis data supplied for the report")]
    NoData,

    /// Missing access token, or Google refused the one we were given.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The coin listing could not be produced.
    #[error("Coin listing unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Google rejected the authorization code.
    #[error("Authorization code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Google Drive accepted the token but the upload itself failed.
    #[error("Drive upload failed: {0}")]
    Upload(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::NoData => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExchangeFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::Upload(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, user-facing text. Provider detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::NoData => "A non-empty array of analyses is required to build a report".into(),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::UpstreamUnavailable(_) => "Coin list is unavailable".into(),
            AppError::ExchangeFailed(_) => "Authorization failed".into(),
            AppError::Upload(_) => "Failed to upload the report to Google Drive".into(),
            AppError::Internal(_) => "Internal server error".into(),
        }
    }
}

/// Malformed or mistyped JSON bodies answer with the usual envelope instead
/// of axum's plain-text 4xx.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let mut body = json!({
            "success": false,
            "message": self.public_message(),
        });
        if is_development() {
            body["error"] = json!(self.to_string());
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(AppError::NoData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Upload("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn provider_detail_is_not_the_public_message() {
        let err = AppError::ExchangeFailed("invalid_grant: code already used".into());
        assert_eq!(err.public_message(), "Authorization failed");
        assert!(err.to_string().contains("invalid_grant"));
    }
}
