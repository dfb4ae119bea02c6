use axum::extract::State;
use axum::response::Response;

use crate::application::ports::{LlmClient, TransactionSearch};
use crate::presentation::state::AppState;

use super::responses::spend_query_result_response;

/// Records from the server microphone, then runs the text pipeline on the transcript.
#[tracing::instrument(skip(state))]
pub async fn process_audio_handler<L, S>(State(state): State<AppState<L, S>>) -> Response
where
    L: LlmClient + ?Sized + 'static,
    S: TransactionSearch + ?Sized + 'static,
{
    let result = state.spend_query_service.process_capture().await;
    spend_query_result_response(result)
}
