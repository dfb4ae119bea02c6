use async_trait::async_trait;

use crate::domain::AudioClip;

/// Records a clip from an input device attached to the server.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    async fn record(&self) -> Result<AudioClip, AudioCaptureError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioCaptureError {
    #[error("audio capture is disabled")]
    Disabled,
    #[error("recorder could not be started: {0}")]
    SpawnFailed(String),
    #[error("recorder exited with failure: {0}")]
    RecorderFailed(String),
    #[error("recording timed out after {0}s")]
    TimedOut(u64),
    #[error("recorder produced no audio")]
    NoAudio,
}
