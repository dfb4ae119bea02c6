use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use spendbot::application::ports::{TransactionSearch, TransactionSearchError};
use spendbot::infrastructure::search::{HttpTransactionSearch, NoopTransactionSearch};

use crate::helpers::spawn_mock_server;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn history(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.seen.lock().unwrap().push((authorization, body));
    (state.status, Json(state.reply.clone()))
}

async fn start_history_server(
    status: StatusCode,
    reply: Value,
) -> (String, MockState, tokio::sync::oneshot::Sender<()>) {
    let state = MockState {
        status,
        reply,
        seen: Arc::default(),
    };
    let app = Router::new()
        .route("/transactions/_search", post(history))
        .with_state(state.clone());
    let (base_url, shutdown_tx) = spawn_mock_server(app).await;
    (format!("{}/transactions/_search", base_url), state, shutdown_tx)
}

fn client(endpoint: String) -> HttpTransactionSearch {
    HttpTransactionSearch::new(endpoint, "history-token".to_string(), Duration::from_secs(5))
        .unwrap()
}

#[tokio::test]
async fn given_search_hits_when_searching_then_sources_returned_and_query_posted() {
    let reply = json!({
        "hits": { "total": { "value": 1 }, "hits": [{ "_id": "t1", "_source": { "label": "PMU", "amount": -62.0 } }] }
    });
    let (endpoint, state, shutdown_tx) = start_history_server(StatusCode::OK, reply).await;
    let query = json!({ "size": 100, "query": { "match_all": {} } });

    let hits = client(endpoint).search(&query).await.unwrap();

    assert_eq!(hits.items, vec![json!({ "label": "PMU", "amount": -62.0 })]);
    let seen = state.seen.lock().unwrap();
    assert_eq!(seen[0].0.as_deref(), Some("Bearer history-token"));
    assert_eq!(seen[0].1, query);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_items_envelope_when_searching_then_items_returned() {
    let (endpoint, _state, shutdown_tx) =
        start_history_server(StatusCode::OK, json!({ "items": [{ "label": "Monoprix" }] })).await;

    let hits = client(endpoint).search(&json!({})).await.unwrap();

    assert_eq!(hits.items.len(), 1);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rejected_token_when_searching_then_unauthorized() {
    let (endpoint, _state, shutdown_tx) =
        start_history_server(StatusCode::FORBIDDEN, json!({ "error": "forbidden" })).await;

    let result = client(endpoint).search(&json!({})).await;

    assert!(matches!(result, Err(TransactionSearchError::Unauthorized)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_backend_failure_when_searching_then_request_failed() {
    let (endpoint, _state, shutdown_tx) =
        start_history_server(StatusCode::BAD_GATEWAY, json!({ "error": "down" })).await;

    let result = client(endpoint).search(&json!({})).await;

    assert!(matches!(result, Err(TransactionSearchError::RequestFailed(msg)) if msg.contains("502")));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unexpected_body_when_searching_then_invalid_response() {
    let (endpoint, _state, shutdown_tx) =
        start_history_server(StatusCode::OK, json!({ "data": [] })).await;

    let result = client(endpoint).search(&json!({})).await;

    assert!(matches!(result, Err(TransactionSearchError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_search_disabled_when_searching_then_no_items() {
    let hits = NoopTransactionSearch.search(&json!({})).await.unwrap();

    assert!(hits.is_empty());
}
