//! Prompt construction for segment and title generation.

use crate::StoryEngineConfig;
use serde::Serialize;
use taleweaver_core::{GenerationPurpose, GenerationRequest, Session};
use taleweaver_error::{JsonError, TaleweaverResult};

/// Instructions for segment generation.
pub const SEGMENT_INSTRUCTIONS: &str = r#"You are an interactive story engine for children.

Goals:
- A very varied, coherent story suited to the listener's age.
- Every few minutes the listener must choose.
- 4 choices: 2 moral ones and 2 immoral but tempting ones (an immediate benefit).
- If an immoral choice is taken, the story must stop on the next screen with:
  1) a narration showing the direct consequence of the bad choice (one screen)
  2) a short explanation (1-3 sentences) of the moral lesson

IMPORTANT: Return STRICTLY one valid JSON object and nothing else.

EXPECTED JSON FORMAT:
{
  "narration": "main text (8-12 sentences max). Dialogue goes between double quotes \"...\".",
  "utterances": [
    { "speaker": "HERO", "ageGroup": "CHILD", "gender": "MALE", "text": "..." },
    { "speaker": "MOM", "ageGroup": "ADULT", "gender": "FEMALE", "text": "..." }
  ],
  "choices": [
    { "id": "A", "text": "..." },
    { "id": "B", "text": "..." },
    { "id": "C", "text": "..." },
    { "id": "D", "text": "..." }
  ],
  "moralChoiceIds": ["B", "D"],
  "ended": false,
  "explanation": ""
}

VOICE RULES (utterances):
1) Always provide "utterances".
2) "utterances" holds ONLY spoken dialogue, never narration.
3) Double quotes in "narration" mark DIALOGUE.
   - Every quoted passage MUST have a matching utterance.
   - utterance.text MUST be exactly the quoted text, without the quotes.
   - Utterances follow the order of the dialogue in the narration.
4) "speaker" is STABLE for the whole story:
   - Use "HERO" for the hero, always.
   - Give every other character a short constant id (e.g. "LUCAS", "MOM", "FOX") and reuse it.
   - In the narration, make clear who speaks before each line of dialogue.
5) ageGroup: HERO and other children are "CHILD", adults are "ADULT". Small cute animals
   that talk like children are "CHILD", other animals "ADULT".
6) gender: "FEMALE", "MALE", or "NEUTRAL" when unknown. For HERO, infer it from the
   player's name or the context; when unsure use "NEUTRAL".

CHOICE RULES:
- ended=false:
  - Always 4 choices with unique ids.
  - Always 2 moralChoiceIds, both present in choices.
  - The 2 immoral choices must be tempting (short-term gain), not obviously wicked.
  - Shuffle positions: moral choices must not always sit in the same slots.
- ended=true:
  - choices=[]
  - moralChoiceIds=[]
  - the narration tells the direct consequence of the bad choice, then STOP.
  - explanation briefly says why it was a bad choice and what we learn.

VARIETY RULES:
- Follow the openingStyle for the first segment and the variationPack throughout.
- Never use any phrase from avoidList.
- When storyState.isFailureImminent is true, end the story now (ended=true)."#;

/// Instructions for title generation.
pub const TITLE_INSTRUCTIONS: &str = r#"You write a short, catchy title for an interactive children's story.
Return STRICTLY one valid JSON object:
{ "title": "..." }

Constraints:
- 4 to 8 words
- no quotation marks in the title
- suitable for a child"#;

/// Directive appended to the second attempt when the story must end.
pub const ESCALATION_DIRECTIVE: &str = "IMPORTANT: YOU MUST END THE STORY NOW. \
Return ended=true, choices=[], moralChoiceIds=[], and a non-empty explanation. \
The narration must show a clear consequence of the bad choice, then STOP.";

/// Transition summary for the first segment.
pub const START_SUMMARY: &str = "Story start: the adventure begins.";

/// Transition summary after a moral choice.
pub const MORAL_SUMMARY: &str =
    "The hero chose the right path, even though it takes effort.";

/// Transition summary after an immoral choice, quoting the chosen text.
///
/// # Examples
///
/// ```
/// use taleweaver_narrative::immoral_summary;
///
/// let summary = immoral_summary("Take the cake", 120);
/// assert!(summary.contains("(Take the cake)"));
///
/// let long = immoral_summary(&"x".repeat(200), 10);
/// assert!(long.contains("(xxxxxxxxxx…)"));
/// ```
pub fn immoral_summary(choice_text: &str, max_chars: usize) -> String {
    format!(
        "The hero picked an option that is tempting in the short term ({}), but it has a moral cost.",
        truncate_chars(choice_text, max_chars)
    )
}

/// Cut `text` to `max_chars` characters, adding an ellipsis when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoryContext<'a> {
    target_age: u8,
    player_name: &'a str,
    theme: &'a str,
    title: &'a str,
    language: &'a str,
    chapter_count: u32,
    planned_segments: u32,
    character: &'a str,
    environment: &'a str,
    mission: &'a str,
    tone: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoryState<'a> {
    segment_index: u32,
    immoral_choices_count: u32,
    lives_remaining: u32,
    last_choice_summary: &'a str,
    is_failure_imminent: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VariationContext<'a> {
    story_seed: &'a str,
    opening_style: &'a str,
    variation_pack: &'a str,
    avoid_list: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SegmentPayload<'a> {
    story_context: StoryContext<'a>,
    story_state: StoryState<'a>,
    variation: VariationContext<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitlePayload<'a> {
    target_age: u8,
    player_name: &'a str,
    theme: &'a str,
    language: &'a str,
    chapter_count: u32,
    character: &'a str,
    environment: &'a str,
    mission: &'a str,
    tone: &'a str,
    story_seed: &'a str,
    opening_style: &'a str,
    variation_pack: &'a str,
    avoid_list: &'a [String],
}

fn variation_context(session: &Session) -> VariationContext<'_> {
    VariationContext {
        story_seed: &session.variation.seed,
        opening_style: &session.variation.opening_style,
        variation_pack: &session.variation.variation_pack,
        avoid_list: &session.variation.avoid_list,
    }
}

fn to_value(payload: &impl Serialize) -> TaleweaverResult<serde_json::Value> {
    serde_json::to_value(payload).map_err(|e| {
        JsonError::new(format!("Failed to serialize prompt payload: {}", e)).into()
    })
}

fn instructions(base: &str, config: &StoryEngineConfig) -> String {
    format!(
        "{}\n\nWrite every text field in {}.",
        base,
        config.story().language
    )
}

/// Build the request for the segment at the session's current index.
///
/// `escalate` appends [`ESCALATION_DIRECTIVE`].
pub fn segment_request(
    session: &Session,
    transition_summary: &str,
    force_termination: bool,
    escalate: bool,
    config: &StoryEngineConfig,
) -> TaleweaverResult<GenerationRequest> {
    let payload = SegmentPayload {
        story_context: StoryContext {
            target_age: session.target_age,
            player_name: &session.player_name,
            theme: &session.theme,
            title: &session.title,
            language: &config.story().language,
            chapter_count: session.chapter_count,
            planned_segments: session.planned_segments(),
            character: &session.framing.character,
            environment: &session.framing.environment,
            mission: &session.framing.mission,
            tone: &session.framing.tone,
        },
        story_state: StoryState {
            segment_index: session.current_segment_index,
            immoral_choices_count: session.immoral_choices_count,
            lives_remaining: session.lives_remaining,
            last_choice_summary: transition_summary,
            is_failure_imminent: force_termination,
        },
        variation: variation_context(session),
    };

    Ok(GenerationRequest {
        purpose: GenerationPurpose::Segment,
        instructions: instructions(SEGMENT_INSTRUCTIONS, config),
        input: to_value(&payload)?,
        directive: escalate.then(|| ESCALATION_DIRECTIVE.to_string()),
        temperature: Some(config.generation().temperature),
    })
}

/// Build the title request for a freshly created session.
pub fn title_request(
    session: &Session,
    config: &StoryEngineConfig,
) -> TaleweaverResult<GenerationRequest> {
    let variation = variation_context(session);
    let payload = TitlePayload {
        target_age: session.target_age,
        player_name: &session.player_name,
        theme: &session.theme,
        language: &config.story().language,
        chapter_count: session.chapter_count,
        character: &session.framing.character,
        environment: &session.framing.environment,
        mission: &session.framing.mission,
        tone: &session.framing.tone,
        story_seed: variation.story_seed,
        opening_style: variation.opening_style,
        variation_pack: variation.variation_pack,
        avoid_list: variation.avoid_list,
    };

    Ok(GenerationRequest {
        purpose: GenerationPurpose::Title,
        instructions: instructions(TITLE_INSTRUCTIONS, config),
        input: to_value(&payload)?,
        directive: None,
        temperature: Some(config.generation().temperature),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use taleweaver_core::{StoryFraming, StoryVariation};

    fn session() -> Session {
        let mut session = Session::new(
            6,
            "Mia",
            "pirates",
            10,
            StoryFraming {
                character: "A heroic child named Mia".to_string(),
                environment: "A ship".to_string(),
                mission: "Find the map".to_string(),
                tone: "Playful".to_string(),
            },
            StoryVariation {
                seed: "seed-1".to_string(),
                opening_style: "letter".to_string(),
                variation_pack: "theme=pirates".to_string(),
                avoid_list: vec!["wounded fox".to_string()],
            },
        );
        session.ensure_plan();
        session
    }

    #[test]
    fn segment_payload_carries_full_context() {
        let config = StoryEngineConfig::default();
        let request = segment_request(&session(), START_SUMMARY, false, false, &config).unwrap();
        let input = &request.input;

        assert_eq!(request.purpose, GenerationPurpose::Segment);
        assert_eq!(input["storyContext"]["targetAge"], 6);
        assert_eq!(input["storyContext"]["plannedSegments"], 10);
        assert_eq!(input["storyContext"]["mission"], "Find the map");
        assert_eq!(input["storyState"]["segmentIndex"], 0);
        assert_eq!(input["storyState"]["lastChoiceSummary"], START_SUMMARY);
        assert_eq!(input["storyState"]["isFailureImminent"], false);
        assert_eq!(input["variation"]["storySeed"], "seed-1");
        assert_eq!(input["variation"]["avoidList"][0], "wounded fox");
        assert!(request.directive.is_none());
        assert!(request.instructions.ends_with("Write every text field in English."));
    }

    #[test]
    fn escalation_appends_directive() {
        let config = StoryEngineConfig::default();
        let request = segment_request(&session(), MORAL_SUMMARY, true, true, &config).unwrap();
        assert_eq!(request.input["storyState"]["isFailureImminent"], true);
        assert!(request.input_text().ends_with(ESCALATION_DIRECTIVE));
    }

    #[test]
    fn title_payload_carries_variation() {
        let request = title_request(&session(), &StoryEngineConfig::default()).unwrap();
        assert_eq!(request.purpose, GenerationPurpose::Title);
        assert_eq!(request.input["openingStyle"], "letter");
        assert_eq!(request.input["chapterCount"], 10);
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate_chars("short", 120), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc…");
    }
}
