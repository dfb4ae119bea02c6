use async_trait::async_trait;

use crate::domain::AudioClip;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("engine misconfigured: {0}")]
    Misconfigured(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
