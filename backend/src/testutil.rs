//! Local stand-in for the Google endpoints the backend talks to.
//!
//! Accepts `good-code` at the token endpoint and `live-token` as a bearer
//! token; everything else is rejected the way Google rejects it.
//! [`RATE_LIMITED_TOKEN`] is a valid token whose uploads hit a 403 rate limit.

use axum::{
    body::Bytes,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use std::collections::HashMap;

pub const RATE_LIMITED_TOKEN: &str = "rate-limited-token";

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn bearer_is_live(headers: &HeaderMap) -> bool {
    matches!(bearer(headers), Some("live-token") | Some(RATE_LIMITED_TOKEN))
}

async fn token(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
    let code_ok = form.get("code").map(String::as_str) == Some("good-code");
    let grant_ok = form.get("grant_type").map(String::as_str) == Some("authorization_code");
    if code_ok && grant_ok {
        (StatusCode::OK, Json(json!({ "access_token": "live-token", "expires_in": 3599 })))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant", "error_description": "Bad Request" })),
        )
    }
}

async fn about(headers: HeaderMap) -> impl IntoResponse {
    if bearer_is_live(&headers) {
        (StatusCode::OK, Json(json!({ "user": { "displayName": "Test" } })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "code": 401 } })))
    }
}

async fn upload(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> impl IntoResponse {
    if !bearer_is_live(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "code": 401 } })));
    }
    if bearer(&headers) == Some(RATE_LIMITED_TOKEN) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": { "code": 403, "errors": [{ "reason": "userRateLimitExceeded" }] } })),
        );
    }
    if query.get("uploadType").map(String::as_str) != Some("multipart") {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "uploadType" })));
    }

    // The metadata part is the first JSON object in the body.
    let text = String::from_utf8_lossy(&body);
    let name = text
        .split("\r\n\r\n")
        .nth(1)
        .and_then(|part| part.split("\r\n--").next())
        .and_then(|json| serde_json::from_str::<serde_json::Value>(json).ok())
        .and_then(|v| v["name"].as_str().map(str::to_string))
        .unwrap_or_default();

    (StatusCode::OK, Json(json!({ "id": "file-1", "name": name })))
}

/// Bind the stub on an ephemeral port and return its base URL.
pub async fn spawn_google_stub() -> String {
    let app = Router::new()
        .route("/token", post(token))
        .route("/drive/v3/about", get(about))
        .route("/upload/drive/v3/files", post(upload));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
