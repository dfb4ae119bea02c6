use std::sync::Arc;

use crate::application::ports::{CompletionRequest, LlmClient, LlmClientError, SearchHits};

pub const ANALYSIS_SYSTEM_PROMPT: &str = "Analyze financial transaction data.";
const ANALYSIS_TEMPERATURE: f32 = 0.5;

pub fn build_analysis_prompt(transactions_json: &str) -> String {
    format!(
        r#"You are a financial analyst. Read the transactions below and report only the most important measurable facts.

Transactions:
{transactions_json}

Analyses:
- Group transactions by category, merchant or location when several values exist.
- Give the highest transaction overall or per group.
- Give the average transaction amount and say what it is based on (per transaction, per day, per week).
- Report spending trends over time or around holidays only when they are clear.

Rules:
- Output exactly three one-line highlights.
- State numbers and facts only. No interpretation, no assumptions, no advice.
- Omit any insight that is not significant.
- No headings and no introduction."#
    )
}

/// Second model pass producing a short factual summary of the matched transactions.
pub struct SpendingAnalyst<L: LlmClient + ?Sized> {
    llm_client: Arc<L>,
    max_items: usize,
}

impl<L: LlmClient + ?Sized> SpendingAnalyst<L> {
    pub fn new(llm_client: Arc<L>, max_items: usize) -> Self {
        Self {
            llm_client,
            max_items,
        }
    }

    /// Returns `None` without calling the model when there is nothing to analyze.
    pub async fn analyze(&self, hits: &SearchHits) -> Result<Option<String>, LlmClientError> {
        let items = &hits.items[..hits.items.len().min(self.max_items)];
        if items.is_empty() {
            return Ok(None);
        }
        let transactions_json = serde_json::to_string(items)
            .map_err(|e| LlmClientError::InvalidResponse(format!("serialize items: {}", e)))?;

        let request =
            CompletionRequest::new(ANALYSIS_SYSTEM_PROMPT, build_analysis_prompt(&transactions_json))
                .with_temperature(ANALYSIS_TEMPERATURE);

        let analysis = self.llm_client.complete(&request).await?;
        tracing::info!(
            items = items.len(),
            chars = analysis.len(),
            "Spending analysis completed"
        );

        Ok(Some(analysis.trim().to_string()))
    }
}
