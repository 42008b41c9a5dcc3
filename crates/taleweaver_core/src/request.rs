//! Request types accepted by the engine and sent to the text generator.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Parameters for starting a new story.
///
/// Framing fields are optional; blank or missing ones are defaulted by the
/// engine.
///
/// # Examples
///
/// ```
/// use taleweaver_core::StartStoryRequest;
///
/// let request = StartStoryRequest::builder()
///     .target_age(7_u8)
///     .player_name("Mia")
///     .theme("pirates")
///     .chapter_count(10_u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.chapter_count, 10);
/// assert!(request.tone.is_none());
///
/// let calm = StartStoryRequest::builder()
///     .target_age(5_u8)
///     .player_name("Leo")
///     .theme("space")
///     .chapter_count(6_u32)
///     .tone("calm")
///     .build()
///     .unwrap();
/// assert_eq!(calm.tone.as_deref(), Some("calm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct StartStoryRequest {
    /// Age of the listener
    pub target_age: u8,
    /// Name of the hero
    pub player_name: String,
    /// Story theme
    pub theme: String,
    /// Requested number of chapters
    #[serde(alias = "durationMinutes")]
    pub chapter_count: u32,
    /// Hero description
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub character: Option<String>,
    /// Setting
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub environment: Option<String>,
    /// Goal of the hero
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub mission: Option<String>,
    /// Mood
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub tone: Option<String>,
}

impl StartStoryRequest {
    /// Create a new builder.
    pub fn builder() -> StartStoryRequestBuilder {
        StartStoryRequestBuilder::default()
    }
}

/// What a generation request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationPurpose {
    /// A story segment answering the segment contract
    Segment,
    /// A short `{"title": ...}` object
    Title,
}

/// A prompt for the text generator: instructions plus a JSON input payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// What the answer will be used for
    pub purpose: GenerationPurpose,
    /// System-level instructions
    pub instructions: String,
    /// Structured input
    pub input: serde_json::Value,
    /// Extra plain-text directive appended after the input
    pub directive: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Input payload rendered as JSON text, followed by the directive if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use taleweaver_core::{GenerationPurpose, GenerationRequest};
    ///
    /// let request = GenerationRequest {
    ///     purpose: GenerationPurpose::Segment,
    ///     instructions: "Write a segment.".to_string(),
    ///     input: serde_json::json!({"segmentIndex": 2}),
    ///     directive: Some("STOP NOW.".to_string()),
    ///     temperature: None,
    /// };
    /// assert_eq!(request.input_text(), "{\"segmentIndex\":2}\n\nSTOP NOW.");
    /// ```
    pub fn input_text(&self) -> String {
        match &self.directive {
            Some(directive) => format!("{}\n\n{}", self.input, directive),
            None => self.input.to_string(),
        }
    }
}
