use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{AudioCaptureError, LlmClientError, TranscriptionError};
use crate::application::services::{ExtractionError, SpendQueryError, SpendQueryOutcome};
use crate::domain::{AmountFilter, FilterRecord};

/// Filters echoed back to the client in a fixed key order.
#[derive(Debug, Serialize)]
pub struct FilterSummary {
    pub start_date: String,
    pub end_date: String,
    pub amount: String,
    pub amount_filter: AmountFilter,
    pub category: String,
    pub pfm_category: Vec<String>,
    pub transaction_type: String,
    pub keywords: Vec<String>,
    pub time_frame: String,
    pub sub_category: String,
    pub beneficiary: String,
    pub movement_type: String,
    pub movement_scope: String,
    pub math_operation: &'static str,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl From<&FilterRecord> for FilterSummary {
    fn from(record: &FilterRecord) -> Self {
        Self {
            start_date: text(&record.start_date),
            end_date: text(&record.end_date),
            amount: text(&record.amount),
            amount_filter: record.amount_filter(),
            category: text(&record.category),
            pfm_category: record.pfm_category.clone(),
            transaction_type: text(&record.transaction_type),
            keywords: record.keywords.clone(),
            time_frame: text(&record.time_frame),
            sub_category: text(&record.sub_category),
            beneficiary: text(&record.beneficiaries),
            movement_type: text(&record.movement_type),
            movement_scope: text(&record.movement_scope),
            math_operation: record.math_operation.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpendQueryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    pub user_message: String,
    pub clarification_needed: Vec<String>,
    pub clarification_options: Vec<String>,
    pub items: Vec<Value>,
    pub analysis: Option<String>,
    pub filters: FilterSummary,
    pub confidence_scores: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
    pub query: Value,
}

impl From<SpendQueryOutcome> for SpendQueryResponse {
    fn from(outcome: SpendQueryOutcome) -> Self {
        let filters = FilterSummary::from(&outcome.filters);
        let record = outcome.filters;
        Self {
            transcript: outcome.transcript,
            user_message: record.user_message.unwrap_or_default(),
            clarification_needed: record.clarification_needed,
            clarification_options: record.clarification_options,
            items: outcome.items,
            analysis: outcome.analysis,
            filters,
            confidence_scores: record.confidence_scores,
            search_url: outcome.search_url,
            query: outcome.query,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn status_for(error: &SpendQueryError) -> StatusCode {
    match error {
        SpendQueryError::EmptyQuery | SpendQueryError::EmptyAudio => StatusCode::BAD_REQUEST,
        SpendQueryError::Extraction(ExtractionError::Completion(LlmClientError::RateLimited)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        SpendQueryError::Extraction(_) | SpendQueryError::Search(_) => StatusCode::BAD_GATEWAY,
        SpendQueryError::Transcription(TranscriptionError::UnsupportedFormat(_)) => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        }
        SpendQueryError::Transcription(_) => StatusCode::BAD_GATEWAY,
        SpendQueryError::Capture(_) => StatusCode::SERVICE_UNAVAILABLE,
        SpendQueryError::SearchUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a pipeline failure to `{"error": ...}` with a matching status.
pub fn spend_query_error_response(error: SpendQueryError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Spend query failed");
    } else {
        tracing::warn!(error = %error, status = status.as_u16(), "Spend query rejected");
    }

    error_response(status, public_message(&error, status))
}

/// Upstream details stay in the logs; server-side failures get a fixed message.
fn public_message(error: &SpendQueryError, status: StatusCode) -> String {
    let message = match error {
        SpendQueryError::Capture(AudioCaptureError::Disabled) => {
            "Microphone capture is not enabled on this server"
        }
        SpendQueryError::Extraction(ExtractionError::InvalidModelOutput) => {
            return error.to_string();
        }
        _ if !status.is_server_error() => return error.to_string(),
        SpendQueryError::Extraction(ExtractionError::Completion(LlmClientError::RateLimited)) => {
            "Language model is busy, try again shortly"
        }
        SpendQueryError::Extraction(_) => "Language model request failed",
        SpendQueryError::Search(_) => "Transaction search failed",
        SpendQueryError::Transcription(_) => "Transcription failed",
        SpendQueryError::Capture(_) => "Microphone capture failed",
        SpendQueryError::SearchUrl(_) => "Could not build the search link",
        SpendQueryError::EmptyQuery | SpendQueryError::EmptyAudio => return error.to_string(),
    };
    message.to_string()
}

pub fn spend_query_result_response(result: Result<SpendQueryOutcome, SpendQueryError>) -> Response {
    match result {
        Ok(outcome) => (StatusCode::OK, Json(SpendQueryResponse::from(outcome))).into_response(),
        Err(e) => spend_query_error_response(e),
    }
}
