/// Container formats accepted for transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Mp4,
    Ogg,
    Webm,
    Flac,
}

impl AudioFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence {
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some(Self::Mp4),
            "audio/ogg" => Some(Self::Ogg),
            "audio/webm" | "video/webm" => Some(Self::Webm),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "wav" => Some(Self::Wav),
            "mp3" | "mpga" | "mpeg" => Some(Self::Mp3),
            "mp4" | "m4a" => Some(Self::Mp4),
            "ogg" | "oga" => Some(Self::Ogg),
            "webm" => Some(Self::Webm),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "audio/mp4",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
            Self::Flac => "audio/flac",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Mp4 => "m4a",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::Flac => "flac",
        }
    }
}

/// Recorded or uploaded audio awaiting transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub file_name: String,
    pub format: AudioFormat,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, file_name: Option<&str>, format: AudioFormat) -> Self {
        let file_name = file_name
            .filter(|name| !name.trim().is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("audio.{}", format.extension()));
        Self {
            data,
            file_name,
            format,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
