mod audio_capture;
mod llm_client;
mod transaction_search;
mod transcription_engine;

pub use audio_capture::{AudioCapture, AudioCaptureError};
pub use llm_client::{CompletionRequest, LlmClient, LlmClientError, ResponseSchema};
pub use transaction_search::{SearchHits, TransactionSearch, TransactionSearchError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
