use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{
    AudioCapture, AudioCaptureError, LlmClient, TransactionSearch, TransactionSearchError,
    TranscriptionEngine, TranscriptionError,
};
use crate::domain::{AudioClip, FilterRecord};

use super::filter_extractor::{ExtractionError, FilterExtractor};
use super::search_query::{QueryOptions, build_search_query};
use super::search_url::{SearchUrlError, build_search_url};
use super::spending_analyst::SpendingAnalyst;

/// Which optional stages run after filter extraction.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub analyze: bool,
    pub deep_link_base: Option<String>,
    pub query: QueryOptions,
    pub analysis_max_items: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            analyze: true,
            deep_link_base: None,
            query: QueryOptions::default(),
            analysis_max_items: 200,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpendQueryOutcome {
    pub transcript: Option<String>,
    pub filters: FilterRecord,
    pub query: Value,
    pub items: Vec<Value>,
    pub analysis: Option<String>,
    pub search_url: Option<String>,
}

pub struct SpendQueryService<L, S>
where
    L: LlmClient + ?Sized,
    S: TransactionSearch + ?Sized,
{
    extractor: FilterExtractor<L>,
    analyst: SpendingAnalyst<L>,
    search: Arc<S>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    audio_capture: Arc<dyn AudioCapture>,
    options: PipelineOptions,
}

impl<L, S> SpendQueryService<L, S>
where
    L: LlmClient + ?Sized,
    S: TransactionSearch + ?Sized,
{
    pub fn new(
        llm_client: Arc<L>,
        search: Arc<S>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        audio_capture: Arc<dyn AudioCapture>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor: FilterExtractor::new(Arc::clone(&llm_client)),
            analyst: SpendingAnalyst::new(llm_client, options.analysis_max_items),
            search,
            transcription_engine,
            audio_capture,
            options,
        }
    }

    pub async fn process_text(&self, text: &str) -> Result<SpendQueryOutcome, SpendQueryError> {
        if text.trim().is_empty() {
            return Err(SpendQueryError::EmptyQuery);
        }

        tracing::debug!(chars = text.chars().count(), "Extracting filters");
        let filters = self.extractor.extract(text).await?;
        let query = build_search_query(&filters, &self.options.query);

        let hits = self.search.search(&query).await?;

        let analysis = if self.options.analyze {
            match self.analyst.analyze(&hits).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    tracing::warn!(error = %e, "Spending analysis failed, returning items without it");
                    None
                }
            }
        } else {
            None
        };

        let search_url = match &self.options.deep_link_base {
            Some(base) => Some(build_search_url(base, &filters)?.to_string()),
            None => None,
        };

        tracing::info!(
            items = hits.items.len(),
            analyzed = analysis.is_some(),
            clarification = filters.needs_clarification(),
            "Spend query processed"
        );

        Ok(SpendQueryOutcome {
            transcript: None,
            filters,
            query,
            items: hits.items,
            analysis,
            search_url,
        })
    }

    pub async fn process_audio(
        &self,
        clip: &AudioClip,
    ) -> Result<SpendQueryOutcome, SpendQueryError> {
        if clip.is_empty() {
            return Err(SpendQueryError::EmptyAudio);
        }

        let transcript = self.transcription_engine.transcribe(clip).await?;
        if transcript.trim().is_empty() {
            tracing::warn!(file_name = %clip.file_name, "Transcription returned no speech");
            return Err(SpendQueryError::EmptyQuery);
        }

        let mut outcome = self.process_text(&transcript).await?;
        outcome.transcript = Some(transcript);
        Ok(outcome)
    }

    pub async fn process_capture(&self) -> Result<SpendQueryOutcome, SpendQueryError> {
        let clip = self.audio_capture.record().await?;
        tracing::info!(bytes = clip.data.len(), "Microphone clip captured");
        self.process_audio(&clip).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpendQueryError {
    #[error("query text is empty")]
    EmptyQuery,
    #[error("audio file is empty")]
    EmptyAudio,
    #[error("{0}")]
    Extraction(#[from] ExtractionError),
    #[error("search: {0}")]
    Search(#[from] TransactionSearchError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("capture: {0}")]
    Capture(#[from] AudioCaptureError),
    #[error("search url: {0}")]
    SearchUrl(#[from] SearchUrlError),
}
