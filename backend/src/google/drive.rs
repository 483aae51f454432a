//! # google::drive — remote report delivery
//!
//! Uploads a CSV report with Drive's `uploadType=multipart` call: one
//! `multipart/related` body holding the JSON metadata part followed by the
//! file bytes.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::GOOGLE_TIMEOUT;
use crate::{config::GoogleConfig, error::AppError, report::CSV_MIME};

/// What Drive reports back for the created file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DriveFile {
    pub id:   String,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name:      &'a str,
    mime_type: &'a str,
}

/// Create `file_name` in the user's Drive with `csv` as its content.
pub async fn upload_csv(
    client: &reqwest::Client,
    google: &GoogleConfig,
    access_token: &str,
    file_name: &str,
    csv: &[u8],
) -> Result<DriveFile, AppError> {
    let url = format!("{}/drive/v3/files", google.upload_base);
    let boundary = format!("coinnotes-{}", uuid::Uuid::new_v4().simple());
    let metadata = serde_json::to_vec(&FileMetadata { name: file_name, mime_type: CSV_MIME })
        .map_err(|e| AppError::Internal(e.into()))?;

    info!(file_name, bytes = csv.len(), "☁️ uploading report to Google Drive");

    let response = client
        .post(&url)
        .query(&[("uploadType", "multipart"), ("fields", "id,name")])
        .bearer_auth(access_token)
        .header(
            reqwest::header::CONTENT_TYPE,
            format!("multipart/related; boundary={boundary}"),
        )
        .body(multipart_related(&boundary, &metadata, csv))
        .timeout(GOOGLE_TIMEOUT)
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, "Google Drive unreachable");
            AppError::Upload(format!("Drive unreachable: {e}"))
        })?;

    let status = response.status();
    // 403 also covers quota, rate limits and missing permissions, none of
    // which mean the token is dead.
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AppError::Unauthorized(
            "Google access token is invalid or expired".into(),
        ));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(http_status = %status, body = %body, "Drive returned HTTP error");
        return Err(AppError::Upload(format!("Drive HTTP {status}: {body}")));
    }

    let file: DriveFile = response.json().await.map_err(|e| {
        error!(error = %e, "Drive response parse failed");
        AppError::Upload(format!("Drive response parse error: {e}"))
    })?;

    info!(file_id = %file.id, file_name = %file.name, "✅ report uploaded");
    Ok(file)
}

/// Assemble a two-part `multipart/related` body: metadata, then content.
fn multipart_related(boundary: &str, metadata: &[u8], content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata.len() + content.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata);
    body.extend_from_slice(format!("\r\n--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {CSV_MIME}\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{spawn_google_stub, RATE_LIMITED_TOKEN};

    #[test]
    fn multipart_body_layout() {
        let body = multipart_related("b0", br#"{"name":"x.csv"}"#, b"coin\nBTC");
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--b0\r\nContent-Type: application/json"));
        assert!(text.contains("{\"name\":\"x.csv\"}\r\n--b0\r\nContent-Type: text/csv\r\n\r\ncoin\nBTC"));
        assert!(text.ends_with("\r\n--b0--\r\n"));
    }

    #[tokio::test]
    async fn upload_returns_created_file() {
        let base = spawn_google_stub().await;
        let google = GoogleConfig::pointed_at(&base);
        let file = upload_csv(&reqwest::Client::new(), &google, "live-token", "07.03.24.csv", b"coin\n")
            .await
            .unwrap();
        assert_eq!(file.name, "07.03.24.csv");
        assert_eq!(file.id, "file-1");
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() {
        let base = spawn_google_stub().await;
        let google = GoogleConfig::pointed_at(&base);
        let err = upload_csv(&reqwest::Client::new(), &google, "bad-token", "a.csv", b"coin\n")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn rate_limited_upload_keeps_token_valid() {
        let base = spawn_google_stub().await;
        let google = GoogleConfig::pointed_at(&base);
        let err = upload_csv(&reqwest::Client::new(), &google, RATE_LIMITED_TOKEN, "a.csv", b"coin\n")
            .await
            .unwrap_err();
        match err {
            AppError::Upload(reason) => assert!(reason.contains("userRateLimitExceeded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
