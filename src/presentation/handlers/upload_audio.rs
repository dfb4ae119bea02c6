use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::application::ports::{LlmClient, TransactionSearch};
use crate::domain::{AudioClip, AudioFormat};
use crate::infrastructure::audio::probe_audio;
use crate::presentation::state::AppState;

use super::responses::{error_response, spend_query_result_response};

const AUDIO_FIELD_NAMES: [&str; 2] = ["audio", "file"];

fn is_audio_field(field: &Field<'_>) -> bool {
    field
        .name()
        .map(|name| AUDIO_FIELD_NAMES.contains(&name))
        .unwrap_or(false)
        || field.file_name().is_some()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_audio_handler<L, S>(
    State(state): State<AppState<L, S>>,
    mut multipart: Multipart,
) -> Response
where
    L: LlmClient + ?Sized + 'static,
    S: TransactionSearch + ?Sized + 'static,
{
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if is_audio_field(&field) => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Upload request with no audio file");
                return error_response(StatusCode::BAD_REQUEST, "No audio file uploaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        }
    };

    let file_name = field.file_name().map(String::from);
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let format = AudioFormat::from_mime(&content_type)
        .or_else(|| file_name.as_deref().and_then(AudioFormat::from_file_name));
    let Some(format) = format else {
        tracing::warn!(content_type = %content_type, "Unsupported audio type");
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Unsupported audio type: {}", content_type),
        );
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read audio bytes");
            return error_response(e.status(), format!("Failed to read audio file: {}", e));
        }
    };

    let clip = AudioClip::new(data.to_vec(), file_name.as_deref(), format);

    match probe_audio(&clip) {
        Ok(Some(metadata)) => tracing::debug!(
            file_name = %clip.file_name,
            bytes = clip.data.len(),
            sample_rate = ?metadata.sample_rate,
            duration_secs = ?metadata.duration_secs,
            "Audio upload received"
        ),
        Ok(None) => tracing::debug!(file_name = %clip.file_name, bytes = clip.data.len(), "Audio upload received"),
        Err(e) => tracing::warn!(error = %e, file_name = %clip.file_name, "Audio headers unreadable, forwarding as is"),
    }

    let result = state.spend_query_service.process_audio(&clip).await;
    spend_query_result_response(result)
}
