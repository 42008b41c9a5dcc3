//! End-to-end story flow through the facade re-exports.

use async_trait::async_trait;
use taleweaver::{
    ErrorClass, ErrorReport, GenerationPurpose, GenerationRequest, InMemoryStoryRepository,
    LogFormat, StartStoryRequest, StoryEngine, StoryEngineConfig, StoryRepository, StoryStatus,
    TaleweaverResult, TextGenerator,
};
use uuid::Uuid;

/// Generator that tells a fixed story: moral ids are always A and C, and any
/// forced termination is honoured at once.
struct FableGenerator;

#[async_trait]
impl TextGenerator for FableGenerator {
    async fn generate(&self, req: &GenerationRequest) -> TaleweaverResult<String> {
        if req.purpose == GenerationPurpose::Title {
            return Ok(r#"{"title": "The Fox and the Lantern"}"#.to_string());
        }

        let failing = req.input["storyState"]["isFailureImminent"] == true;
        let segment = if failing {
            serde_json::json!({
                "narration": "The lantern went dark and the path vanished.",
                "choices": [],
                "moralChoiceIds": [],
                "ended": true,
                "explanation": "Taking the lantern left the fox in the dark."
            })
        } else {
            serde_json::json!({
                "narration": "The fox asked \"Will you help me?\"",
                "utterances": [
                    { "speaker": "FOX", "ageGroup": "ADULT", "gender": "MALE", "text": "Will you help me?" }
                ],
                "choices": [
                    { "id": "A", "text": "Help the fox" },
                    { "id": "B", "text": "Take the lantern" },
                    { "id": "C", "text": "Share your bread" },
                    { "id": "D", "text": "Run off with the bread" }
                ],
                "moralChoiceIds": ["C", "A"],
                "ended": false
            })
        };
        Ok(segment.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "fable"
    }

    fn model_name(&self) -> &str {
        "fable-1"
    }
}

#[test]
fn test_log_format_parses() {
    assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::default(), LogFormat::Pretty);
    assert!("xml".parse::<LogFormat>().is_err());
}

#[tokio::test]
async fn test_fail_rewind_and_recover() {
    let repo = InMemoryStoryRepository::new();
    let engine = StoryEngine::new(FableGenerator, repo.clone(), StoryEngineConfig::default());

    let request = StartStoryRequest::builder()
        .target_age(5u8)
        .player_name("Léo")
        .theme("the night forest")
        .chapter_count(6u32)
        .build()
        .unwrap();

    let first = engine.start(&request).await.unwrap();
    assert_eq!(first.title, "The Fox and the Lantern");
    assert_eq!(first.lives_total, 3);

    let second = engine.choose(first.session_id, "A").await.unwrap();
    assert_eq!(second.segment_index, 1);

    let ending = engine.choose(first.session_id, "B").await.unwrap();
    assert!(ending.ended);
    assert_eq!(ending.lives_remaining, 2);

    let rewound = engine.rewind(first.session_id).await.unwrap();
    assert_eq!(rewound.segment_index, 1);
    assert_eq!(rewound.disabled_choice_ids, vec!["B".to_string()]);
    assert_eq!(repo.node_count(first.session_id).await, 2);

    let resumed = engine.choose(first.session_id, "C").await.unwrap();
    assert_eq!(resumed.segment_index, 2);

    let session = repo.get_session(first.session_id).await.unwrap();
    assert_eq!(session.status, StoryStatus::Running);
    assert_eq!(session.last_moral_segment_index, 1);
}

#[tokio::test]
async fn test_errors_become_reports() {
    let engine = StoryEngine::new(
        FableGenerator,
        InMemoryStoryRepository::new(),
        StoryEngineConfig::default(),
    );

    let err = engine.rewind(Uuid::new_v4()).await.unwrap_err();
    let report = ErrorReport::capture(&err);
    assert_eq!(report.class, ErrorClass::Client);
    assert_eq!(report.error_id.len(), 10);
    assert!(!report.message.contains('\n'));
}
