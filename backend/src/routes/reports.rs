//! # routes::reports
//!
//! Report Exporter delivery: CSV download and Google Drive upload. Both
//! render through [`crate::report::render_csv`].

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::AppError,
    google::drive::upload_csv,
    models::AnalysisRecord,
    report::{render_csv, todays_file_name, CSV_MIME},
    state::SharedState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Kept raw so a missing, non-array or empty `data` all answer `NoData`.
    #[serde(default)]
    pub data:         Option<Value>,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl ReportRequest {
    /// The records, or `NoData` unless `data` is a non-empty array.
    fn records(&self) -> Result<Vec<AnalysisRecord>, AppError> {
        let items = match &self.data {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(AppError::NoData),
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                AnalysisRecord::deserialize(item)
                    .map_err(|e| AppError::BadRequest(format!("Invalid analysis at index {i}: {e}")))
            })
            .collect()
    }
}

// ─── POST /api/reports/generate ───────────────────────────────────────────────

pub async fn generate_report(
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let records = req.records()?;
    let csv = render_csv(&records)?;
    let file_name = todays_file_name();

    info!(rows = records.len(), file_name = %file_name, "📄 report generated");

    Ok((
        [
            (header::CONTENT_TYPE, format!("{CSV_MIME}; charset=utf-8")),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        csv,
    ))
}

// ─── POST /api/reports/upload-to-drive ────────────────────────────────────────

pub async fn upload_to_drive(
    State(state): State<SharedState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let records = req.records()?;

    let token = req
        .access_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("A Google access token is required".into()))?;

    let csv = render_csv(&records)?;
    let file_name = todays_file_name();

    let file = upload_csv(
        &state.http_client,
        &state.config.google,
        token,
        &file_name,
        &csv,
    )
    .await?;

    Ok(Json(json!({
        "success":  true,
        "message":  "Report uploaded to Google Drive",
        "fileId":   file.id,
        "fileName": file.name,
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};
    use serde_json::json;

    use crate::report::todays_file_name;
    use crate::routes::test_support::{json, post_json, send, test_app};
    use crate::testutil::{spawn_google_stub, RATE_LIMITED_TOKEN};

    fn btc_record() -> serde_json::Value {
        json!({
            "coin": { "id": "btc", "symbol": "btc", "name": "BTC" },
            "shortPositionNotes": "",
            "shortAnalysis": "sell",
            "longPositionNotes": "",
            "longAnalysis": "",
        })
    }

    #[tokio::test]
    async fn generate_streams_csv_attachment() {
        let app = test_app("http://127.0.0.1:9");
        let req = post_json("/api/reports/generate", json!({ "data": [btc_record()] }));
        let (status, headers, body) = send(app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
        assert_eq!(
            headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
            format!("attachment; filename=\"{}\"", todays_file_name())
        );
        let text = String::from_utf8(body).unwrap();
        assert_eq!(text.lines().nth(1), Some("BTC,,sell,,"));
    }

    #[tokio::test]
    async fn generate_without_data_is_400() {
        for payload in [json!({}), json!({ "data": [] })] {
            let app = test_app("http://127.0.0.1:9");
            let (status, _, body) = send(app, post_json("/api/reports/generate", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json(&body)["success"], false);
        }
    }

    #[tokio::test]
    async fn misshapen_data_is_400_with_envelope() {
        for payload in [json!({ "data": "x" }), json!({ "data": { "coin": "btc" } }), json!({ "data": null })] {
            let app = test_app("http://127.0.0.1:9");
            let (status, headers, body) = send(app, post_json("/api/reports/generate", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/json"));
            assert_eq!(json(&body)["success"], false);
        }
    }

    #[tokio::test]
    async fn non_object_body_is_400_with_envelope() {
        let app = test_app("http://127.0.0.1:9");
        let (status, _, body) = send(app, post_json("/api/reports/generate", json!([1, 2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body)["success"], false);
    }

    #[tokio::test]
    async fn null_text_fields_render_as_empty_cells() {
        let app = test_app("http://127.0.0.1:9");
        let record = json!({
            "coin": { "id": "btc", "symbol": "btc", "name": "BTC" },
            "shortPositionNotes": null,
            "shortAnalysis": "sell",
            "longAnalysis": null,
        });
        let req = post_json("/api/reports/generate", json!({ "data": [record] }));
        let (status, _, body) = send(app, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap().lines().nth(1), Some("BTC,,sell,,"));
    }

    #[tokio::test]
    async fn upload_without_token_is_401() {
        let app = test_app("http://127.0.0.1:9");
        let req = post_json("/api/reports/upload-to-drive", json!({ "data": [btc_record()] }));
        let (status, _, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json(&body)["success"], false);
    }

    #[tokio::test]
    async fn upload_checks_data_before_token() {
        let app = test_app("http://127.0.0.1:9");
        let req = post_json("/api/reports/upload-to-drive", json!({ "data": [] }));
        let (status, _, _) = send(app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_with_live_token_reports_file() {
        let base = spawn_google_stub().await;
        let req = post_json(
            "/api/reports/upload-to-drive",
            json!({ "data": [btc_record()], "accessToken": "live-token" }),
        );
        let (status, _, body) = send(test_app(&base), req).await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["success"], true);
        assert_eq!(body["fileId"], "file-1");
        assert_eq!(body["fileName"], todays_file_name());
    }

    #[tokio::test]
    async fn upload_with_dead_token_is_401() {
        let base = spawn_google_stub().await;
        let req = post_json(
            "/api/reports/upload-to-drive",
            json!({ "data": [btc_record()], "accessToken": "bad-token" }),
        );
        let (status, _, _) = send(test_app(&base), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn drive_rate_limit_is_500_not_401() {
        let base = spawn_google_stub().await;
        let req = post_json(
            "/api/reports/upload-to-drive",
            json!({ "data": [btc_record()], "accessToken": RATE_LIMITED_TOKEN }),
        );
        let (status, _, body) = send(test_app(&base), req).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(&body)["success"], false);
    }
}
