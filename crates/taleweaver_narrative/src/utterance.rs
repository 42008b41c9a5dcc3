//! Utterance normalization.

use taleweaver_core::{AgeGroup, Gender, GeneratedSegment, HERO_SPEAKER};

/// Whether `speaker` is the player's character.
pub fn is_hero(speaker: &str, player_name: &str) -> bool {
    let speaker = speaker.trim();
    let player_name = player_name.trim();
    speaker.eq_ignore_ascii_case(HERO_SPEAKER)
        || (!player_name.is_empty() && speaker.to_lowercase() == player_name.to_lowercase())
}

/// Fill in age group and gender defaults on every utterance.
///
/// The hero always speaks as a child. Other speakers without an age group
/// become adults. Gender is upper-cased and anything unrecognized becomes
/// `NEUTRAL`. Never fails.
///
/// # Examples
///
/// ```
/// use taleweaver_core::{GeneratedSegment, Utterance};
/// use taleweaver_narrative::normalize_utterances;
///
/// let mut segment = GeneratedSegment {
///     narration: "Mia said \"Hi\" and Mom said \"Hello\"".to_string(),
///     utterances: vec![
///         Utterance::new("mia", "ADULT", "female", "Hi"),
///         Utterance::new("MOM", "", "", "Hello"),
///     ],
///     ..Default::default()
/// };
///
/// normalize_utterances(&mut segment, "Mia");
/// assert_eq!(segment.utterances[0].age_group, "CHILD");
/// assert_eq!(segment.utterances[0].gender, "FEMALE");
/// assert_eq!(segment.utterances[1].age_group, "ADULT");
/// assert_eq!(segment.utterances[1].gender, "NEUTRAL");
/// ```
pub fn normalize_utterances(segment: &mut GeneratedSegment, player_name: &str) {
    for utterance in &mut segment.utterances {
        if is_hero(&utterance.speaker, player_name) {
            utterance.age_group = AgeGroup::Child.to_string();
        } else if utterance.age_group.trim().is_empty() {
            utterance.age_group = AgeGroup::Adult.to_string();
        }
        utterance.gender = Gender::normalize(&utterance.gender).to_string();
    }
}
