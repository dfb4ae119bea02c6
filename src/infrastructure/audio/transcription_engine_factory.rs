use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProvider, TranscriptionSettings};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

const DEFAULT_AZURE_API_VERSION: &str = "2024-06-01";

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// `fallback_api_key` is the chat key, reused when no transcription key is set.
    pub fn create(
        settings: &TranscriptionSettings,
        fallback_api_key: &str,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| fallback_api_key.to_string());
        if api_key.is_empty() {
            return Err(TranscriptionError::Misconfigured(
                "API key required for Whisper transcription".to_string(),
            ));
        }

        match settings.provider {
            TranscriptionProvider::OpenAi => Ok(Arc::new(OpenAiWhisperEngine::new(
                api_key,
                settings.base_url.clone(),
                Some(settings.model.clone()),
                settings.language.clone(),
            ))),
            TranscriptionProvider::Azure => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    TranscriptionError::Misconfigured(
                        "base_url required for Azure Whisper".to_string(),
                    )
                })?;
                Ok(Arc::new(AzureWhisperEngine::new(
                    base_url,
                    &settings.model,
                    &api_key,
                    settings
                        .api_version
                        .as_deref()
                        .unwrap_or(DEFAULT_AZURE_API_VERSION),
                )
                .with_language(settings.language.clone())))
            }
        }
    }
}
