use std::io::Cursor;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::domain::{AudioClip, AudioFormat};

#[derive(Debug, Clone, PartialEq)]
pub struct AudioMetadata {
    pub sample_rate: Option<u32>,
    pub channels: Option<usize>,
    pub duration_secs: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioProbeError {
    #[error("unrecognized audio container: {0}")]
    Unrecognized(String),
    #[error("no audio track found")]
    NoTrack,
}

/// Reads container headers without decoding samples.
///
/// WebM is not understood by the demuxers compiled in, so it yields `Ok(None)`
/// and is forwarded to the transcription API unchecked.
pub fn probe_audio(clip: &AudioClip) -> Result<Option<AudioMetadata>, AudioProbeError> {
    if clip.format == AudioFormat::Webm {
        return Ok(None);
    }

    let cursor = Cursor::new(clip.data.clone());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(clip.format.extension());
    hint.mime_type(clip.format.as_mime());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioProbeError::Unrecognized(e.to_string()))?;

    let track = probed.format.default_track().ok_or(AudioProbeError::NoTrack)?;
    let params = &track.codec_params;

    let duration_secs = match (params.n_frames, params.sample_rate) {
        (Some(frames), Some(rate)) if rate > 0 => Some(frames as f64 / rate as f64),
        _ => None,
    };

    Ok(Some(AudioMetadata {
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count()),
        duration_secs,
    }))
}
