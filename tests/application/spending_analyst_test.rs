use std::sync::Arc;

use serde_json::json;

use spendbot::application::ports::SearchHits;
use spendbot::application::services::SpendingAnalyst;

use crate::helpers::ScriptedLlmClient;

#[tokio::test]
async fn given_no_hits_when_analyzed_then_none_without_model_call() {
    let llm = Arc::new(ScriptedLlmClient::answering(&[]));
    let analyst = SpendingAnalyst::new(Arc::clone(&llm), 10);

    let analysis = analyst.analyze(&SearchHits::default()).await.unwrap();

    assert_eq!(analysis, None);
    assert_eq!(llm.request_count(), 0);
}

#[tokio::test]
async fn given_more_hits_than_limit_when_analyzed_then_prompt_is_truncated() {
    let llm = Arc::new(ScriptedLlmClient::answering(&["Plus grosse dépense : Carrefour"]));
    let analyst = SpendingAnalyst::new(Arc::clone(&llm), 2);
    let hits = SearchHits {
        items: vec![
            json!({ "label": "Carrefour" }),
            json!({ "label": "Monoprix" }),
            json!({ "label": "Franprix" }),
        ],
    };

    let analysis = analyst.analyze(&hits).await.unwrap();

    assert_eq!(analysis.as_deref(), Some("Plus grosse dépense : Carrefour"));
    let requests = llm.requests.lock().unwrap();
    assert_eq!(requests[0].temperature, 0.5);
    assert!(requests[0].response_schema.is_none());
    assert!(requests[0].user_prompt.contains("Monoprix"));
    assert!(!requests[0].user_prompt.contains("Franprix"));
}

#[tokio::test]
async fn given_zero_item_limit_when_analyzed_then_none_without_model_call() {
    let llm = Arc::new(ScriptedLlmClient::answering(&["unused"]));
    let analyst = SpendingAnalyst::new(Arc::clone(&llm), 0);
    let hits = SearchHits {
        items: vec![json!({ "label": "Carrefour" })],
    };

    let analysis = analyst.analyze(&hits).await.unwrap();

    assert_eq!(analysis, None);
    assert_eq!(llm.request_count(), 0);
}
