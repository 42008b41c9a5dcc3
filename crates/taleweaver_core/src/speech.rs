//! Speech rendering types.

use serde::{Deserialize, Serialize};

/// Audio container requested from the speech renderer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AudioFormat {
    /// MPEG layer 3
    #[default]
    Mp3,
    /// Opus in Ogg
    Opus,
    /// AAC
    Aac,
    /// FLAC
    Flac,
    /// Uncompressed WAV
    Wav,
}

/// Voice chosen for a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelection {
    /// Renderer voice id
    pub voice_id: String,
    /// Style guidance for the renderer
    pub style_instructions: String,
}

/// A fully resolved call to the speech renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    /// Renderer voice id
    pub voice: String,
    /// Style guidance
    pub instructions: String,
    /// Text to speak
    pub text: String,
    /// Playback speed, already clamped
    pub speed: f64,
    /// Audio container
    pub format: AudioFormat,
}

/// Caller request to speak one utterance of a session.
///
/// # Examples
///
/// ```
/// use taleweaver_core::UtteranceSpeechRequest;
///
/// let request: UtteranceSpeechRequest = serde_json::from_str(
///     r#"{"speaker": "HERO", "ageGroup": "CHILD", "text": "Hello!", "speed": 1.2}"#,
/// ).unwrap();
/// assert_eq!(request.speed, Some(1.2));
/// assert!(request.gender.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtteranceSpeechRequest {
    /// Speaker id as used in the segment
    pub speaker: String,
    /// "CHILD" or "ADULT"
    pub age_group: String,
    /// "MALE", "FEMALE" or "NEUTRAL"
    #[serde(default)]
    pub gender: Option<String>,
    /// Text to speak
    pub text: String,
    /// Playback speed; 1.0 when absent
    #[serde(default)]
    pub speed: Option<f64>,
    /// Pronunciation locale; the configured one when absent
    #[serde(default)]
    pub locale: Option<String>,
}
