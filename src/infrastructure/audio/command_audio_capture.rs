use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::application::ports::{AudioCapture, AudioCaptureError};
use crate::domain::{AudioClip, AudioFormat};

/// Captures from the server's default input device by running a recorder
/// that writes a WAV stream to stdout (`arecord`, `sox`, `ffmpeg`).
pub struct CommandAudioCapture {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAudioCapture {
    pub fn new(program: String, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program,
            args,
            timeout,
        }
    }
}

#[async_trait]
impl AudioCapture for CommandAudioCapture {
    async fn record(&self) -> Result<AudioClip, AudioCaptureError> {
        tracing::info!(program = %self.program, "Recording from microphone");

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AudioCaptureError::SpawnFailed(format!("{}: {}", self.program, e)))?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| AudioCaptureError::TimedOut(self.timeout.as_secs()))?
            .map_err(|e| AudioCaptureError::RecorderFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioCaptureError::RecorderFailed(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(AudioCaptureError::NoAudio);
        }

        Ok(AudioClip::new(
            output.stdout,
            Some("recording.wav"),
            AudioFormat::Wav,
        ))
    }
}

/// Stand-in used when capture is switched off in settings.
pub struct DisabledAudioCapture;

#[async_trait]
impl AudioCapture for DisabledAudioCapture {
    async fn record(&self) -> Result<AudioClip, AudioCaptureError> {
        Err(AudioCaptureError::Disabled)
    }
}
