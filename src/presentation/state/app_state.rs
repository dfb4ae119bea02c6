use std::sync::Arc;

use crate::application::ports::{LlmClient, TransactionSearch};
use crate::application::services::SpendQueryService;

pub struct AppState<L, S>
where
    L: LlmClient + ?Sized,
    S: TransactionSearch + ?Sized,
{
    pub spend_query_service: Arc<SpendQueryService<L, S>>,
    pub max_upload_bytes: usize,
}

impl<L, S> Clone for AppState<L, S>
where
    L: LlmClient + ?Sized,
    S: TransactionSearch + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            spend_query_service: Arc::clone(&self.spend_query_service),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
