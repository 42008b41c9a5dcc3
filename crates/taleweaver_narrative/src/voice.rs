//! Voice assignment for spoken dialogue.

use sha2::{Digest, Sha256};
use taleweaver_core::{AgeGroup, Gender, VoiceSelection};

const CHILD_FEMALE_VOICES: &[&str] = &["nova", "shimmer"];
const CHILD_MALE_VOICES: &[&str] = &["fable", "ash"];
const ADULT_FEMALE_VOICES: &[&str] = &["coral", "ballad"];
const ADULT_MALE_VOICES: &[&str] = &["onyx", "echo"];
const NEUTRAL_VOICES: &[&str] = &["alloy", "sage"];

/// Speed used when none is requested or the request is not a finite number.
pub const DEFAULT_SPEED: f64 = 1.0;
/// Slowest speed the renderer accepts.
pub const MIN_SPEED: f64 = 0.25;
/// Fastest speed the renderer accepts.
pub const MAX_SPEED: f64 = 4.0;

/// Pick a voice for a speaker.
///
/// The same `(seed, speaker)` pair always maps to the same voice, so a
/// character keeps its voice for the whole session. Anything that is not
/// `CHILD` is treated as an adult, and unrecognized genders use the neutral
/// bucket. Speaker ids compare case-insensitively.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::pick_voice;
///
/// let first = pick_voice("seed", "MOM", "ADULT", Some("FEMALE"), 7);
/// let again = pick_voice("seed", " mom ", "adult", Some("female"), 7);
/// assert_eq!(first, again);
/// assert!(["coral", "ballad"].contains(&first.voice_id.as_str()));
/// ```
pub fn pick_voice(
    seed: &str,
    speaker: &str,
    age_group: &str,
    gender: Option<&str>,
    target_age: u8,
) -> VoiceSelection {
    let child = AgeGroup::parse(age_group) == Some(AgeGroup::Child);
    let gender = gender.map(Gender::normalize).unwrap_or_default();

    let (pool, style_instructions) = match (child, gender) {
        (true, Gender::Female) => (
            CHILD_FEMALE_VOICES,
            child_instructions("a real little girl", target_age),
        ),
        (true, Gender::Male) => (
            CHILD_MALE_VOICES,
            child_instructions("a real little boy", target_age),
        ),
        (true, Gender::Neutral) => (
            CHILD_FEMALE_VOICES,
            child_instructions("a real child", target_age),
        ),
        (false, Gender::Female) => (
            ADULT_FEMALE_VOICES,
            "Warm, expressive female voice suited to children's stories.".to_string(),
        ),
        (false, Gender::Male) => (
            ADULT_MALE_VOICES,
            "Warm, expressive male voice suited to children's stories.".to_string(),
        ),
        (false, Gender::Neutral) => (
            NEUTRAL_VOICES,
            "Warm, expressive narrator voice suited to children.".to_string(),
        ),
    };

    let key = format!("{}|{}", seed, speaker.trim().to_uppercase());
    VoiceSelection {
        voice_id: pick_from(pool, &key).to_string(),
        style_instructions,
    }
}

fn child_instructions(who: &str, target_age: u8) -> String {
    format!(
        "Speak like {} of about {}. Natural, spontaneous, slightly high-pitched voice. No professional adult diction.",
        who, target_age
    )
}

fn pick_from<'a>(pool: &[&'a str], key: &str) -> &'a str {
    let digest = Sha256::digest(key.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let index = u64::from_be_bytes(head) % pool.len() as u64;
    pool[index as usize]
}

/// Clamp a requested speed into the renderer's range.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::clamp_speed;
///
/// assert_eq!(clamp_speed(None), 1.0);
/// assert_eq!(clamp_speed(Some(f64::NAN)), 1.0);
/// assert_eq!(clamp_speed(Some(10.0)), 4.0);
/// assert_eq!(clamp_speed(Some(0.1)), 0.25);
/// assert_eq!(clamp_speed(Some(1.2)), 1.2);
/// ```
pub fn clamp_speed(speed: Option<f64>) -> f64 {
    match speed {
        Some(s) if s.is_finite() => s.clamp(MIN_SPEED, MAX_SPEED),
        _ => DEFAULT_SPEED,
    }
}
