//! Generated segment payload.
//!
//! These types mirror the JSON contract the text generator answers with.
//! Parsing is lenient: missing or `null` strings and lists become empty, and
//! unknown fields are ignored. Structural rules are enforced later by the
//! segment validator, not here.

use serde::{Deserialize, Deserializer, Serialize};

/// Speaker id reserved for the player's character.
pub const HERO_SPEAKER: &str = "HERO";

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_list<T>() -> Option<Vec<T>> {
    Some(Vec::new())
}

/// Canonical form of a choice id for comparisons: trimmed and uppercased.
///
/// Uses full Unicode case mapping, so `"é"` and `"É"` fold together.
///
/// # Examples
///
/// ```
/// use taleweaver_core::fold_choice_id;
///
/// assert_eq!(fold_choice_id(" b "), "B");
/// assert_eq!(fold_choice_id("é"), fold_choice_id("É"));
/// ```
pub fn fold_choice_id(id: &str) -> String {
    id.trim().to_uppercase()
}

/// Age bucket of a speaking character.
///
/// # Examples
///
/// ```
/// use taleweaver_core::AgeGroup;
///
/// assert_eq!(AgeGroup::parse(" child "), Some(AgeGroup::Child));
/// assert_eq!(AgeGroup::parse("elder"), None);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AgeGroup {
    /// A child voice
    Child,
    /// An adult voice
    Adult,
}

impl AgeGroup {
    /// Parse a loosely formatted age group.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

/// Gender of a speaking character.
///
/// # Examples
///
/// ```
/// use taleweaver_core::Gender;
///
/// assert_eq!(Gender::normalize("female"), Gender::Female);
/// assert_eq!(Gender::normalize("robot"), Gender::Neutral);
/// assert_eq!(Gender::normalize(""), Gender::Neutral);
/// ```
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Gender {
    /// Male voice
    Male,
    /// Female voice
    Female,
    /// Neutral or unspecified
    #[default]
    Neutral,
}

impl Gender {
    /// Parse a gender, degrading anything unrecognized to `Neutral`.
    pub fn normalize(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }
}

/// One option offered to the player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Choice {
    /// Short id, e.g. "A"
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Text shown to the player
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

impl Choice {
    /// Create a choice.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A quoted line of dialogue, structured for multi-voice speech.
///
/// Age group and gender stay raw strings until normalization fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    /// Stable speaker id, reused when the same character speaks again
    #[serde(default, deserialize_with = "null_as_default")]
    pub speaker: String,
    /// "CHILD" or "ADULT"
    #[serde(default, deserialize_with = "null_as_default")]
    pub age_group: String,
    /// "MALE", "FEMALE" or "NEUTRAL"
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: String,
    /// Spoken text without quotation marks
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

impl Utterance {
    /// Create an utterance.
    pub fn new(
        speaker: impl Into<String>,
        age_group: impl Into<String>,
        gender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            age_group: age_group.into(),
            gender: gender.into(),
            text: text.into(),
        }
    }
}

/// A generated narrative unit as returned by the text generator.
///
/// `choices` and `moral_choice_ids` default to empty lists when absent but
/// stay `None` when the generator sends an explicit `null`, because an ended
/// segment must carry both lists present and empty.
///
/// # Examples
///
/// ```
/// use taleweaver_core::GeneratedSegment;
///
/// let segment: GeneratedSegment = serde_json::from_str(
///     r#"{"narration": "The end.", "ended": true, "explanation": "Be kind."}"#,
/// ).unwrap();
/// assert!(segment.ended);
/// assert_eq!(segment.choices, Some(vec![]));
/// assert!(segment.utterances.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSegment {
    /// Narration text, with dialogue in quotation marks
    #[serde(default, deserialize_with = "null_as_default")]
    pub narration: String,
    /// One utterance per quoted fragment, in order
    #[serde(default, deserialize_with = "null_as_default")]
    pub utterances: Vec<Utterance>,
    /// Options offered to the player
    #[serde(default = "empty_list")]
    pub choices: Option<Vec<Choice>>,
    /// Ids of the choices that count as moral
    #[serde(default = "empty_list")]
    pub moral_choice_ids: Option<Vec<String>>,
    /// Whether the story stops here
    #[serde(default)]
    pub ended: bool,
    /// Lesson shown when the story stops
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Default for GeneratedSegment {
    fn default() -> Self {
        Self {
            narration: String::new(),
            utterances: Vec::new(),
            choices: empty_list(),
            moral_choice_ids: empty_list(),
            ended: false,
            explanation: None,
        }
    }
}

impl GeneratedSegment {
    /// Choices, or an empty slice when absent.
    pub fn offered_choices(&self) -> &[Choice] {
        self.choices.as_deref().unwrap_or_default()
    }

    /// Moral choice ids, or an empty slice when absent.
    pub fn moral_ids(&self) -> &[String] {
        self.moral_choice_ids.as_deref().unwrap_or_default()
    }

    /// Find a choice by id, ignoring case and surrounding whitespace.
    pub fn find_choice(&self, id: &str) -> Option<&Choice> {
        let id = fold_choice_id(id);
        self.offered_choices()
            .iter()
            .find(|c| fold_choice_id(&c.id) == id)
    }

    /// Whether `id` names one of the moral choices, ignoring case.
    pub fn is_moral_choice(&self, id: &str) -> bool {
        let id = fold_choice_id(id);
        self.moral_ids().iter().any(|m| fold_choice_id(m) == id)
    }

    /// Explanation, or an empty string when absent.
    pub fn explanation_text(&self) -> &str {
        self.explanation.as_deref().unwrap_or_default()
    }
}
