//! Read-only HTTP interface over the tracked histories.
//!
//! Three data routes backed by snapshot reads, plus a liveness route. An
//! unknown item is the only client-visible failure; upstream polling gaps
//! are indistinguishable from "no new data".

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use log::info;
use orewatch_rust_core::{MarketHistory, MarketRegistry};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state behind every handler.
pub struct AppState {
    pub registry: MarketRegistry,
    pub history: MarketHistory,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/markets", get(list_markets))
        .route("/data/:item", get(price_history))
        .route("/recent/:item", get(sale_history))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is shut down.
pub async fn serve(state: Arc<AppState>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", addr))?;

    info!("HTTP interface listening on {}", addr);
    axum::serve(listener, build_router(state))
        .await
        .context("HTTP server exited")?;
    Ok(())
}

async fn list_markets(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.registry.items().to_vec())
}

async fn price_history(
    State(state): State<Arc<AppState>>,
    Path(item): Path<String>,
) -> Response {
    match state.history.price_snapshot(&item).await {
        Some(samples) => Json(samples).into_response(),
        None => invalid_item(),
    }
}

async fn sale_history(
    State(state): State<Arc<AppState>>,
    Path(item): Path<String>,
) -> Response {
    match state.history.sale_snapshot(&item).await {
        Some(sales) => Json(sales).into_response(),
        None => invalid_item(),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn invalid_item() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Invalid item" }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orewatch_rust_core::PriceSample;

    fn state() -> Arc<AppState> {
        let registry = MarketRegistry::new(vec!["diamond".to_string()]);
        let history = MarketHistory::new(&registry);
        Arc::new(AppState { registry, history })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_markets() {
        let Json(markets) = list_markets(State(state())).await;
        assert_eq!(markets, vec!["diamond"]);
    }

    #[tokio::test]
    async fn test_price_history_for_tracked_item() {
        let state = state();
        state
            .history
            .push_price("diamond", PriceSample { price: 500.0, time: 1000 })
            .await;

        let response = price_history(State(state), Path("diamond".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([{ "price": 500.0, "time": 1000 }]));
    }

    #[tokio::test]
    async fn test_unknown_item_is_404() {
        let response = price_history(State(state()), Path("dirt".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid item" }));

        let response = sale_history(State(state()), Path("dirt".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_empty_history_is_empty_array_not_404() {
        let response = sale_history(State(state()), Path("diamond".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}
