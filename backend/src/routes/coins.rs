//! # routes::coins
//!
//! Read-only access to the Coin Source.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{error::AppError, state::SharedState};

// ─── GET /api/coins ───────────────────────────────────────────────────────────

pub async fn list_coins(State(state): State<SharedState>) -> impl IntoResponse {
    let coins = state.coins.list();
    Json(json!({
        "success": true,
        "count":   coins.len(),
        "data":    coins,
    }))
}

// ─── GET /api/coins/:id ───────────────────────────────────────────────────────

pub async fn get_coin(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let coin = state.coins.get(&id)?;
    Ok(Json(json!({
        "success": true,
        "data":    coin,
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{get, json, send, test_app};

    #[tokio::test]
    async fn lists_configured_coins_in_order() {
        let (status, _, body) = send(test_app("http://127.0.0.1:9"), get("/api/coins")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json(&body),
            json!({
                "success": true,
                "count": 2,
                "data": [
                    { "id": "btc", "symbol": "btc", "name": "BTC" },
                    { "id": "eth", "symbol": "eth", "name": "ETH" },
                ],
            })
        );
    }

    #[tokio::test]
    async fn single_coin_lookup() {
        let (status, _, body) = send(test_app("http://127.0.0.1:9"), get("/api/coins/ETH")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["data"]["name"], "ETH");
    }

    #[tokio::test]
    async fn unknown_coin_is_404() {
        let (status, _, body) = send(test_app("http://127.0.0.1:9"), get("/api/coins/doge")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body = json(&body);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Coin with id doge not found");
    }
}
