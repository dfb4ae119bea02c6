use std::sync::Arc;

use serde_json::json;

use spendbot::application::ports::{AudioCaptureError, LlmClientError};
use spendbot::application::services::{
    ANALYSIS_SYSTEM_PROMPT, ExtractionError, PipelineOptions, SpendQueryError,
};
use spendbot::domain::{AudioClip, AudioFormat};

use crate::helpers::{
    FixedCapture, PMU_FILTERS, ScriptedLlmClient, StaticSearch, UnavailableCapture, service_with,
};

fn pmu_items() -> Vec<serde_json::Value> {
    vec![
        json!({ "label": "PMU Paris 11", "amount": -62.0 }),
        json!({ "label": "PMU Bastille", "amount": -55.5 }),
    ]
}

#[tokio::test]
async fn given_text_query_when_processed_then_search_and_analysis_run() {
    let llm = Arc::new(ScriptedLlmClient::answering(&[PMU_FILTERS, "  Total: 117,50€  "]));
    let search = Arc::new(StaticSearch::new(pmu_items()));
    let service = service_with(
        Arc::clone(&llm),
        Arc::clone(&search),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let outcome = service.process_text("Combien au PMU ?").await.unwrap();

    assert_eq!(outcome.transcript, None);
    assert_eq!(outcome.items.len(), 2);
    assert_eq!(outcome.analysis.as_deref(), Some("Total: 117,50€"));
    assert_eq!(outcome.search_url, None);

    let queries = search.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0], outcome.query);

    let requests = llm.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].system_prompt, ANALYSIS_SYSTEM_PROMPT);
    assert!(requests[1].user_prompt.contains("PMU Bastille"));
}

#[tokio::test]
async fn given_no_matching_transactions_when_processed_then_analysis_skipped() {
    let llm = Arc::new(ScriptedLlmClient::answering(&[PMU_FILTERS]));
    let service = service_with(
        Arc::clone(&llm),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let outcome = service.process_text("Combien au PMU ?").await.unwrap();

    assert!(outcome.items.is_empty());
    assert_eq!(outcome.analysis, None);
    assert_eq!(llm.request_count(), 1);
}

#[tokio::test]
async fn given_analysis_disabled_when_processed_then_single_model_call() {
    let llm = Arc::new(ScriptedLlmClient::answering(&[PMU_FILTERS]));
    let options = PipelineOptions {
        analyze: false,
        ..PipelineOptions::default()
    };
    let service = service_with(
        Arc::clone(&llm),
        Arc::new(StaticSearch::new(pmu_items())),
        Arc::new(FixedCapture),
        options,
    );

    let outcome = service.process_text("Combien au PMU ?").await.unwrap();

    assert_eq!(outcome.items.len(), 2);
    assert_eq!(outcome.analysis, None);
    assert_eq!(llm.request_count(), 1);
}

#[tokio::test]
async fn given_failing_analysis_when_processed_then_items_still_returned() {
    let llm = Arc::new(ScriptedLlmClient::new(vec![
        Ok(PMU_FILTERS.to_string()),
        Err(LlmClientError::ApiRequestFailed("HTTP 500".to_string())),
    ]));
    let service = service_with(
        llm,
        Arc::new(StaticSearch::new(pmu_items())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let outcome = service.process_text("Combien au PMU ?").await.unwrap();

    assert_eq!(outcome.items.len(), 2);
    assert_eq!(outcome.analysis, None);
}

#[tokio::test]
async fn given_deep_link_base_when_processed_then_search_url_returned() {
    let options = PipelineOptions {
        analyze: false,
        deep_link_base: Some("https://app.example.com/transactions".to_string()),
        ..PipelineOptions::default()
    };
    let service = service_with(
        Arc::new(ScriptedLlmClient::answering(&[r#"{"beneficiaries": "PMU"}"#])),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        options,
    );

    let outcome = service.process_text("PMU").await.unwrap();

    assert_eq!(
        outcome.search_url.as_deref(),
        Some("https://app.example.com/transactions?beneficiary=PMU")
    );
}

#[tokio::test]
async fn given_blank_text_when_processed_then_empty_query_without_model_call() {
    let llm = Arc::new(ScriptedLlmClient::answering(&[]));
    let service = service_with(
        Arc::clone(&llm),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let error = service.process_text(" \n\t").await.unwrap_err();

    assert!(matches!(error, SpendQueryError::EmptyQuery));
    assert_eq!(llm.request_count(), 0);
}

#[tokio::test]
async fn given_rate_limited_extraction_when_processed_then_error_surfaces() {
    let service = service_with(
        Arc::new(ScriptedLlmClient::new(vec![Err(LlmClientError::RateLimited)])),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let error = service.process_text("PMU").await.unwrap_err();

    assert!(matches!(
        error,
        SpendQueryError::Extraction(ExtractionError::Completion(LlmClientError::RateLimited))
    ));
}

#[tokio::test]
async fn given_audio_clip_when_processed_then_transcript_attached() {
    let llm = Arc::new(ScriptedLlmClient::answering(&[PMU_FILTERS]));
    let service = service_with(
        Arc::clone(&llm),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );
    let clip = AudioClip::new(b"OggS....".to_vec(), Some("question.ogg"), AudioFormat::Ogg);

    let outcome = service.process_audio(&clip).await.unwrap();

    assert_eq!(
        outcome.transcript.as_deref(),
        Some("Combien au PMU le mois dernier ?")
    );
    assert!(
        llm.requests.lock().unwrap()[0]
            .user_prompt
            .ends_with("Question: \"Combien au PMU le mois dernier ?\"")
    );
}

#[tokio::test]
async fn given_empty_clip_when_processed_then_empty_audio() {
    let service = service_with(
        Arc::new(ScriptedLlmClient::answering(&[])),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let error = service
        .process_audio(&AudioClip::new(Vec::new(), None, AudioFormat::Wav))
        .await
        .unwrap_err();

    assert!(matches!(error, SpendQueryError::EmptyAudio));
}

#[tokio::test]
async fn given_microphone_when_captured_then_pipeline_runs_on_recording() {
    let service = service_with(
        Arc::new(ScriptedLlmClient::answering(&[PMU_FILTERS])),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(FixedCapture),
        PipelineOptions::default(),
    );

    let outcome = service.process_capture().await.unwrap();

    assert!(outcome.transcript.is_some());
    assert_eq!(outcome.filters.category.as_deref(), Some("Paiements"));
}

#[tokio::test]
async fn given_capture_disabled_when_captured_then_capture_error() {
    let service = service_with(
        Arc::new(ScriptedLlmClient::answering(&[])),
        Arc::new(StaticSearch::new(Vec::new())),
        Arc::new(UnavailableCapture),
        PipelineOptions::default(),
    );

    let error = service.process_capture().await.unwrap_err();

    assert!(matches!(
        error,
        SpendQueryError::Capture(AudioCaptureError::Disabled)
    ));
}
