use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::application::ports::{SearchHits, TransactionSearch, TransactionSearchError};

/// Posts the bool query to the history endpoint with a bearer token.
pub struct HttpTransactionSearch {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl HttpTransactionSearch {
    pub fn new(
        endpoint: String,
        api_token: String,
        timeout: Duration,
    ) -> Result<Self, TransactionSearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransactionSearchError::RequestFailed(format!("client: {}", e)))?;
        Ok(Self {
            client,
            endpoint,
            api_token,
        })
    }
}

/// Accepts `{"items": [...]}` or a raw search response (`hits.hits[]._source`).
fn extract_items(body: Value) -> Result<Vec<Value>, TransactionSearchError> {
    if let Some(Value::Array(items)) = body.get("items") {
        return Ok(items.clone());
    }

    if let Some(Value::Array(hits)) = body.pointer("/hits/hits") {
        return Ok(hits
            .iter()
            .filter_map(|hit| hit.get("_source").cloned())
            .collect());
    }

    Err(TransactionSearchError::InvalidResponse(
        "expected `items` or `hits.hits`".to_string(),
    ))
}

#[async_trait]
impl TransactionSearch for HttpTransactionSearch {
    async fn search(&self, query: &Value) -> Result<SearchHits, TransactionSearchError> {
        tracing::debug!(endpoint = %self.endpoint, "Fetching transaction history");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(query)
            .send()
            .await
            .map_err(|e| TransactionSearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TransactionSearchError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransactionSearchError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransactionSearchError::InvalidResponse(e.to_string()))?;

        let items = extract_items(body)?;
        tracing::info!(items = items.len(), "Transaction history fetched");

        Ok(SearchHits { items })
    }
}

/// Stand-in used when history lookup is switched off.
pub struct NoopTransactionSearch;

#[async_trait]
impl TransactionSearch for NoopTransactionSearch {
    async fn search(&self, _query: &Value) -> Result<SearchHits, TransactionSearchError> {
        Ok(SearchHits::default())
    }
}
