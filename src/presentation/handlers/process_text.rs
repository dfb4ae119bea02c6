use axum::Form;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;

use crate::application::ports::{LlmClient, TransactionSearch};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::responses::spend_query_result_response;

#[derive(Deserialize)]
pub struct ProcessTextForm {
    pub user_text: String,
}

#[tracing::instrument(skip(state, form))]
pub async fn process_text_handler<L, S>(
    State(state): State<AppState<L, S>>,
    Form(form): Form<ProcessTextForm>,
) -> Response
where
    L: LlmClient + ?Sized + 'static,
    S: TransactionSearch + ?Sized + 'static,
{
    tracing::debug!(user_text = %sanitize_prompt(&form.user_text), "Processing text query");

    let result = state.spend_query_service.process_text(&form.user_text).await;
    spend_query_result_response(result)
}
