mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, CaptureSettings, DeepLinkSettings, LlmProvider, LlmSettings,
    LoggingSettings, SearchSettings, ServerSettings, Settings, TranscriptionProvider,
    TranscriptionSettings,
};
