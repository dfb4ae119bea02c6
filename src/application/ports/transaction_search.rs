use async_trait::async_trait;
use serde_json::Value;

/// Transactions returned by the history endpoint, kept as raw JSON documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub items: Vec<Value>,
}

impl SearchHits {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
pub trait TransactionSearch: Send + Sync {
    async fn search(&self, query: &Value) -> Result<SearchHits, TransactionSearchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransactionSearchError {
    #[error("search request failed: {0}")]
    RequestFailed(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
