mod audio_probe;
mod azure_whisper_engine;
mod command_audio_capture;
mod openai_whisper_engine;
mod transcription_engine_factory;
mod whisper_request;

pub use audio_probe::{AudioMetadata, AudioProbeError, probe_audio};
pub use azure_whisper_engine::AzureWhisperEngine;
pub use command_audio_capture::{CommandAudioCapture, DisabledAudioCapture};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::TranscriptionEngineFactory;
