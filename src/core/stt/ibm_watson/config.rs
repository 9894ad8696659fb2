//! IBM Watson Speech-to-Text recognition configuration.
//!
//! This module defines the per-call [`RecognitionConfig`] together with the
//! model and audio format names documented by the service.

use crate::core::stt::audio::AudioStream;
use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Default Watson STT model for English (US).
pub const DEFAULT_MODEL: &str = "en-US_BroadbandModel";

/// Service-side inactivity timeout in seconds when the parameter is omitted.
pub const DEFAULT_INACTIVITY_TIMEOUT: i32 = 30;

/// Inactivity timeout value meaning "never time out".
pub const INFINITE_INACTIVITY_TIMEOUT: i32 = -1;

// =============================================================================
// Model Configuration
// =============================================================================

/// Watson Speech-to-Text models.
///
/// Broadband models suit audio sampled at 16kHz or more, narrowband models
/// suit telephone audio at 8kHz.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeechModel {
    ArArBroadband,
    EnUkBroadband,
    EnUkNarrowband,
    #[default]
    EnUsBroadband,
    EnUsNarrowband,
    EsEsBroadband,
    EsEsNarrowband,
    JaJpBroadband,
    JaJpNarrowband,
    PtBrBroadband,
    PtBrNarrowband,
    ZhCnBroadband,
    ZhCnNarrowband,

    /// Custom model (user-supplied model name)
    Custom(String),
}

impl SpeechModel {
    /// Get the model identifier string for the API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ArArBroadband => "ar-AR_BroadbandModel",
            Self::EnUkBroadband => "en-UK_BroadbandModel",
            Self::EnUkNarrowband => "en-UK_NarrowbandModel",
            Self::EnUsBroadband => "en-US_BroadbandModel",
            Self::EnUsNarrowband => "en-US_NarrowbandModel",
            Self::EsEsBroadband => "es-ES_BroadbandModel",
            Self::EsEsNarrowband => "es-ES_NarrowbandModel",
            Self::JaJpBroadband => "ja-JP_BroadbandModel",
            Self::JaJpNarrowband => "ja-JP_NarrowbandModel",
            Self::PtBrBroadband => "pt-BR_BroadbandModel",
            Self::PtBrNarrowband => "pt-BR_NarrowbandModel",
            Self::ZhCnBroadband => "zh-CN_BroadbandModel",
            Self::ZhCnNarrowband => "zh-CN_NarrowbandModel",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for SpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<SpeechModel> for String {
    fn from(model: SpeechModel) -> Self {
        model.as_str().to_string()
    }
}

// =============================================================================
// Audio Content Type
// =============================================================================

/// Audio MIME types accepted by the recognize endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioContentType {
    Flac,
    /// Raw 16-bit linear PCM. The rate must match the capture rate.
    L16 { rate: u32, channels: u16 },
    Wav,
    OggOpus,
}

impl AudioContentType {
    /// Get the content-type MIME string for this format.
    pub fn mime(&self) -> String {
        match self {
            Self::Flac => "audio/flac".to_string(),
            Self::L16 { rate, channels } => {
                format!("audio/l16; rate={rate}; channels={channels}")
            }
            Self::Wav => "audio/wav".to_string(),
            Self::OggOpus => "audio/ogg;codecs=opus".to_string(),
        }
    }
}

impl std::fmt::Display for AudioContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

impl From<AudioContentType> for String {
    fn from(content_type: AudioContentType) -> Self {
        content_type.mime()
    }
}

// =============================================================================
// Recognition Configuration
// =============================================================================

/// Parameters for a single recognize call.
///
/// Consumed by value: the audio stream moves into the request. No field is
/// validated; out-of-range thresholds, negative timeouts and unknown content
/// types are sent as-is.
#[derive(Debug, Default)]
pub struct RecognitionConfig {
    /// The identifier of the session to be used.
    pub session_id: String,

    /// The audio to be transcribed, in the format named by `content_type`.
    pub audio: Option<AudioStream>,

    /// The MIME type of the audio, e.g. `audio/flac` or
    /// `audio/l16; rate=48000; channels=2`.
    pub content_type: String,

    /// The identifier of the model to be used, e.g. `en-US_BroadbandModel`.
    pub model: String,

    /// Return multiple final results for phrases separated by long pauses.
    pub continuous: bool,

    /// Seconds of silence after which the service closes the connection.
    /// Use [`INFINITE_INACTIVITY_TIMEOUT`] for no limit.
    pub inactivity_timeout: i32,

    /// Keywords to spot in the audio. Each keyword may hold several tokens.
    pub keywords: Vec<String>,

    /// Lower confidence bound (0..=1) for spotting a keyword.
    pub keywords_threshold: f64,

    /// Maximum number of alternative transcripts to return.
    pub max_alternatives: u32,

    /// Lower confidence bound (0..=1) for word alternatives.
    pub word_alternatives_threshold: f64,

    /// Return a confidence measure for each word.
    pub word_confidence: bool,

    /// Return time alignment for each word.
    pub timestamps: bool,
}

impl RecognitionConfig {
    /// True when every field is at its zero value.
    pub fn is_empty(&self) -> bool {
        self.session_id.is_empty()
            && self.audio.is_none()
            && self.content_type.is_empty()
            && self.model.is_empty()
            && !self.continuous
            && self.inactivity_timeout == 0
            && self.keywords.is_empty()
            && self.keywords_threshold == 0.0
            && self.max_alternatives == 0
            && self.word_alternatives_threshold == 0.0
            && !self.word_confidence
            && !self.timestamps
    }
}

// =============================================================================
// Tests
// =============================================================================
