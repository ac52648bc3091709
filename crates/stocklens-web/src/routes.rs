//! Route definitions and handlers.
//!
//! Every endpoint answers 200 with a JSON body; failures ship as
//! `{"error": "..."}` in the body rather than an HTTP error status —
//! the contract consumers of the legacy service already depend on.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use stocklens_summary::{compare, fifty_two_week, snapshot, top_gainers, TICKER_UNIVERSE};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    #[serde(default = "default_symbol1")]
    symbol1: String,
    #[serde(default = "default_symbol2")]
    symbol2: String,
}

fn default_symbol1() -> String {
    String::from("INFY")
}

fn default_symbol2() -> String {
    String::from("TCS")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/companies", get(companies))
        .route("/data/:ticker", get(ticker_data))
        .route("/summary/:ticker", get(ticker_summary))
        .route("/compare", get(compare_tickers))
        .route("/gainers", get(gainers))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The fixed ticker directory.
async fn companies() -> Json<Value> {
    Json(json!({ "tickers": TICKER_UNIVERSE }))
}

/// The original home page rendered top gainers into a template; this
/// service is JSON-only, so `/` serves the same payload as `/gainers`.
async fn home(State(state): State<AppState>) -> Response {
    cached_gainers(&state, "/").await
}

async fn gainers(State(state): State<AppState>) -> Response {
    cached_gainers(&state, "/gainers").await
}

async fn ticker_data(State(state): State<AppState>, Path(ticker): Path<String>) -> Response {
    let key = format!("/data/{}", ticker.to_ascii_uppercase());
    if let Some(body) = state.cache.get(&key).await {
        return json_body(body);
    }

    let body = render(snapshot(state.market.as_ref(), &ticker).await);
    state.cache.put(key, body.clone()).await;
    json_body(body)
}

async fn ticker_summary(State(state): State<AppState>, Path(ticker): Path<String>) -> Response {
    json_body(render(
        fifty_two_week(state.market.as_ref(), &ticker).await,
    ))
}

async fn compare_tickers(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Response {
    json_body(render(
        compare(state.market.as_ref(), &query.symbol1, &query.symbol2).await,
    ))
}

async fn cached_gainers(state: &AppState, key: &str) -> Response {
    if let Some(body) = state.cache.get(key).await {
        return json_body(body);
    }

    let body = render(top_gainers(state.market.as_ref()).await);
    state.cache.put(key, body.clone()).await;
    json_body(body)
}

/// Serialize either side of an operation result to the response body.
fn render<T: serde::Serialize>(result: Result<T, stocklens_summary::ErrorRecord>) -> String {
    let value = match result {
        Ok(report) => serde_json::to_value(report),
        Err(record) => {
            tracing::warn!(error = %record.error, "operation returned an error record");
            serde_json::to_value(record)
        }
    };

    value
        .unwrap_or_else(|e| json!({ "error": format!("failed to serialize response: {e}") }))
        .to_string()
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
