use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::AudioClip;

use super::whisper_request::{audio_form, failure_from};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "whisper-1";

/// Hosted Whisper through `/audio/transcriptions`, plain-text reply.
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    transcriptions_url: String,
    model: String,
    language: Option<String>,
}

impl OpenAiWhisperEngine {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        language: Option<String>,
    ) -> Self {
        let base_url = base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
        Self {
            client: reqwest::Client::new(),
            api_key,
            transcriptions_url: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            language,
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        let form = audio_form(clip, "text", Some(&self.model), self.language.as_deref())?;

        tracing::debug!(
            model = %self.model,
            file_name = %clip.file_name,
            bytes = clip.data.len(),
            "Sending clip for transcription"
        );

        let response = self
            .client
            .post(&self.transcriptions_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            return Err(failure_from(response).await);
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;
        let transcript = transcript.trim().to_string();

        tracing::info!(chars = transcript.len(), "Clip transcribed");
        Ok(transcript)
    }
}
