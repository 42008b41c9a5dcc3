//! Tests for utterance speech rendering.

mod test_utils;

use taleweaver_core::{
    AudioFormat, Session, StoryFraming, StoryVariation, UtteranceSpeechRequest,
};
use taleweaver_interface::StoryRepository;
use taleweaver_narrative::{
    InMemoryStoryRepository, StoryEngineConfig, UtteranceSpeech, pick_voice,
};
use test_utils::RecordingRenderer;
use uuid::Uuid;

async fn stored_session(repo: &InMemoryStoryRepository) -> Session {
    let session = Session::new(
        6,
        "Mia",
        "dragons",
        10,
        StoryFraming::default(),
        StoryVariation {
            seed: "seed-42".to_string(),
            ..Default::default()
        },
    );
    repo.upsert_session(&session).await.unwrap();
    session
}

fn request(speaker: &str, age_group: &str, text: &str) -> UtteranceSpeechRequest {
    UtteranceSpeechRequest {
        speaker: speaker.to_string(),
        age_group: age_group.to_string(),
        gender: Some("FEMALE".to_string()),
        text: text.to_string(),
        speed: None,
        locale: None,
    }
}

fn service(
    repo: &InMemoryStoryRepository,
) -> UtteranceSpeech<RecordingRenderer, InMemoryStoryRepository> {
    UtteranceSpeech::new(
        RecordingRenderer::new(),
        repo.clone(),
        StoryEngineConfig::default(),
    )
}

#[tokio::test]
async fn test_hero_is_voiced_as_child() {
    let repo = InMemoryStoryRepository::new();
    let session = stored_session(&repo).await;
    let speech = service(&repo);

    let audio = speech
        .speak(session.id, &request("HERO", "ADULT", "Let's go"))
        .await
        .unwrap();
    assert_eq!(audio, b"Let's go".to_vec());

    let calls = speech.renderer().calls();
    let expected = pick_voice("seed-42", "HERO", "CHILD", Some("FEMALE"), 6);
    assert_eq!(calls[0].voice, expected.voice_id);
    assert!(calls[0].instructions.contains("little girl"));
    assert!(calls[0].instructions.starts_with("You speak natural English."));
    assert_eq!(calls[0].speed, 1.0);
    assert_eq!(calls[0].format, AudioFormat::Mp3);
}

#[tokio::test]
async fn test_player_name_counts_as_hero() {
    let repo = InMemoryStoryRepository::new();
    let session = stored_session(&repo).await;
    let speech = service(&repo);

    speech
        .speak(session.id, &request("mia", "ADULT", "Hi"))
        .await
        .unwrap();
    assert!(speech.renderer().calls()[0].instructions.contains("little girl"));
}

#[tokio::test]
async fn test_voice_is_stable_per_speaker() {
    let repo = InMemoryStoryRepository::new();
    let session = stored_session(&repo).await;
    let speech = service(&repo);

    speech
        .speak(session.id, &request("MOM", "ADULT", "Dinner!"))
        .await
        .unwrap();
    speech
        .speak(session.id, &request(" mom ", "adult", "Come inside."))
        .await
        .unwrap();

    let calls = speech.renderer().calls();
    assert_eq!(calls[0].voice, calls[1].voice);
    assert!(["coral", "ballad"].contains(&calls[0].voice.as_str()));
}

#[tokio::test]
async fn test_blank_text_skips_renderer() {
    let repo = InMemoryStoryRepository::new();
    let session = stored_session(&repo).await;
    let speech = service(&repo);

    let audio = speech
        .speak(session.id, &request("MOM", "ADULT", "   "))
        .await
        .unwrap();
    assert!(audio.is_empty());
    assert!(speech.renderer().calls().is_empty());
}

#[tokio::test]
async fn test_speed_is_clamped_and_locale_guidance_applies() {
    let repo = InMemoryStoryRepository::new();
    let session = stored_session(&repo).await;
    let speech = service(&repo);

    let mut req = request("MOM", "ADULT", "Bonsoir");
    req.speed = Some(9.0);
    req.locale = Some("fr-FR".to_string());
    speech.speak(session.id, &req).await.unwrap();

    let call = &speech.renderer().calls()[0];
    assert_eq!(call.speed, 4.0);
    assert!(call.instructions.starts_with("Tu es une voix off"));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let repo = InMemoryStoryRepository::new();
    let speech = service(&repo);

    let err = speech
        .speak(Uuid::new_v4(), &request("MOM", "ADULT", "Hello"))
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}
