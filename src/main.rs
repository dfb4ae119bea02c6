use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use spendbot::application::ports::{AudioCapture, TransactionSearch};
use spendbot::application::services::{PipelineOptions, QueryOptions, SpendQueryService};
use spendbot::infrastructure::audio::{
    CommandAudioCapture, DisabledAudioCapture, TranscriptionEngineFactory,
};
use spendbot::infrastructure::llm::OpenAiChatClient;
use spendbot::infrastructure::observability::{TracingConfig, init_tracing};
use spendbot::infrastructure::search::{HttpTransactionSearch, NoopTransactionSearch};
use spendbot::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(&settings.logging, environment));

    let llm_client = Arc::new(
        OpenAiChatClient::new(&settings.llm).context("Failed to create chat client")?,
    );

    let transcription_engine =
        TranscriptionEngineFactory::create(&settings.transcription, &settings.llm.api_key)
            .context("Failed to create transcription engine")?;

    let search: Arc<dyn TransactionSearch> = if settings.search.enabled {
        Arc::new(
            HttpTransactionSearch::new(
                settings.search.endpoint.clone(),
                settings.search.api_token.clone(),
                Duration::from_secs(settings.search.timeout_secs),
            )
            .context("Failed to create search client")?,
        )
    } else {
        tracing::warn!("Transaction search disabled, responses will carry no items");
        Arc::new(NoopTransactionSearch)
    };

    let audio_capture: Arc<dyn AudioCapture> = if settings.capture.enabled {
        Arc::new(CommandAudioCapture::new(
            settings.capture.program.clone(),
            settings.capture.args.clone(),
            Duration::from_secs(settings.capture.timeout_secs),
        ))
    } else {
        Arc::new(DisabledAudioCapture)
    };

    let options = PipelineOptions {
        analyze: settings.analysis.enabled,
        deep_link_base: settings.deep_link.base_url.clone(),
        query: QueryOptions {
            size: settings.search.size,
            ..QueryOptions::default()
        },
        analysis_max_items: settings.analysis.max_items,
    };

    let spend_query_service = Arc::new(SpendQueryService::new(
        llm_client,
        search,
        transcription_engine,
        audio_capture,
        options,
    ));

    let state = AppState {
        spend_query_service,
        max_upload_bytes: settings.server.max_upload_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let ip = settings
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid server.host {}", settings.server.host))?;
    let addr = SocketAddr::new(ip, settings.server.port);

    tracing::info!(
        %addr,
        environment = %environment,
        model = %settings.llm.chat_model,
        search = settings.search.enabled,
        capture = settings.capture.enabled,
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
