use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError};
use crate::domain::catalog::is_known_pfm_category;
use crate::domain::FilterRecord;

use super::extraction_prompt::{
    EXTRACTION_SCHEMA_NAME, EXTRACTION_SYSTEM_PROMPT, build_extraction_prompt, extraction_schema,
};

/// Turns a free-text question into a [`FilterRecord`] with one model call.
pub struct FilterExtractor<L: LlmClient + ?Sized> {
    llm_client: Arc<L>,
}

impl<L: LlmClient + ?Sized> FilterExtractor<L> {
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    pub async fn extract(&self, user_input: &str) -> Result<FilterRecord, ExtractionError> {
        self.extract_at(user_input, Local::now().date_naive()).await
    }

    pub async fn extract_at(
        &self,
        user_input: &str,
        today: NaiveDate,
    ) -> Result<FilterRecord, ExtractionError> {
        let request = CompletionRequest::new(
            EXTRACTION_SYSTEM_PROMPT,
            build_extraction_prompt(user_input, today),
        )
        .with_temperature(0.0)
        .with_schema(EXTRACTION_SCHEMA_NAME, extraction_schema());

        let raw = self
            .llm_client
            .complete(&request)
            .await
            .map_err(ExtractionError::Completion)?;

        let mut record = FilterRecord::from_model_output(&raw).map_err(|e| {
            tracing::warn!(error = %e, chars = raw.len(), "Model returned malformed filter JSON");
            ExtractionError::InvalidModelOutput
        })?;

        record.pfm_category.retain(|tag| {
            let known = is_known_pfm_category(tag);
            if !known {
                tracing::debug!(tag = %tag, "Dropping unknown PFM category");
            }
            known
        });
        record.user_message = Some(user_input.trim().to_string());

        tracing::info!(
            category = record.category.as_deref().unwrap_or("-"),
            pfm_categories = record.pfm_category.len(),
            clarification = record.needs_clarification(),
            "Filters extracted"
        );

        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("completion: {0}")]
    Completion(LlmClientError),
    #[error("Invalid JSON response format")]
    InvalidModelOutput,
}
