use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};

use crate::application::ports::TranscriptionError;
use crate::domain::AudioClip;

const MAX_ERROR_BODY_CHARS: usize = 300;

/// Multipart body shared by the OpenAI and Azure transcription endpoints.
pub(super) fn audio_form(
    clip: &AudioClip,
    response_format: &'static str,
    model: Option<&str>,
    language: Option<&str>,
) -> Result<Form, TranscriptionError> {
    let file_part = Part::bytes(clip.data.clone())
        .file_name(clip.file_name.clone())
        .mime_str(clip.format.as_mime())
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

    let mut form = Form::new()
        .text("response_format", response_format)
        .part("file", file_part);
    if let Some(model) = model {
        form = form.text("model", model.to_string());
    }
    if let Some(language) = language {
        form = form.text("language", language.to_string());
    }
    Ok(form)
}

/// Rejections of the audio container itself map to `UnsupportedFormat`.
pub(super) async fn failure_from(response: Response) -> TranscriptionError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();

    let format_rejected = status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        || (status == StatusCode::BAD_REQUEST
            && body.to_ascii_lowercase().contains("invalid file format"));

    if format_rejected {
        TranscriptionError::UnsupportedFormat(body)
    } else {
        TranscriptionError::ApiRequestFailed(format!("status {}: {}", status, body))
    }
}
