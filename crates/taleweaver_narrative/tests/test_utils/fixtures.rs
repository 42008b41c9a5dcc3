//! Generator responses and requests shared by the scenario tests.

use serde_json::json;
use taleweaver_core::StartStoryRequest;

/// A valid running segment offering A-D, with `moral` as the moral ids.
///
/// The narration carries one line of hero dialogue, and the response is
/// wrapped in a fenced block the way chat models tend to answer.
pub fn running_segment(narration: &str, moral: [&str; 2]) -> String {
    let segment = json!({
        "narration": format!("{} The hero whispered \"Let's go\".", narration),
        "utterances": [
            { "speaker": "HERO", "ageGroup": "ADULT", "gender": "female", "text": "Let's go" }
        ],
        "choices": [
            { "id": "A", "text": "Share the treasure with the village" },
            { "id": "B", "text": "Keep the treasure and hide it" },
            { "id": "C", "text": "Help the lost parrot home" },
            { "id": "D", "text": "Trick the parrot into carrying your bag" }
        ],
        "moralChoiceIds": moral,
        "ended": false,
        "explanation": ""
    });
    format!("Here is the next segment:\n```json\n{}\n```", segment)
}

/// A valid ending segment.
pub fn ended_segment() -> String {
    json!({
        "narration": "The treasure crumbled to sand and the village went hungry.",
        "utterances": [],
        "choices": [],
        "moralChoiceIds": [],
        "ended": true,
        "explanation": "Keeping everything for yourself leaves others without help."
    })
    .to_string()
}

/// A start request for Mia with the given chapter count.
pub fn start_request(chapter_count: u32) -> StartStoryRequest {
    StartStoryRequest::builder()
        .target_age(7u8)
        .player_name("Mia")
        .theme("pirates")
        .chapter_count(chapter_count)
        .build()
        .expect("valid start request")
}
