//! Rendering a single utterance to audio.

use crate::{StoryEngineConfig, clamp_speed, is_hero, pick_voice};
use taleweaver_core::{AgeGroup, SpeechRequest, UtteranceSpeechRequest};
use taleweaver_error::TaleweaverResult;
use taleweaver_interface::{SpeechRenderer, StoryRepository};
use tracing::debug;
use uuid::Uuid;

/// Turns utterances of a session into audio.
///
/// Voices are picked from the session's variation seed, so a speaker sounds
/// the same on every segment.
pub struct UtteranceSpeech<S: SpeechRenderer, R: StoryRepository> {
    renderer: S,
    repository: R,
    config: StoryEngineConfig,
}

impl<S: SpeechRenderer, R: StoryRepository> UtteranceSpeech<S, R> {
    /// Create a speech service.
    pub fn new(renderer: S, repository: R, config: StoryEngineConfig) -> Self {
        Self {
            renderer,
            repository,
            config,
        }
    }

    /// The speech renderer.
    pub fn renderer(&self) -> &S {
        &self.renderer
    }

    /// Render one utterance.
    ///
    /// The hero always gets a child voice. Blank text yields empty audio
    /// without calling the renderer.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the session is unknown
    /// - any renderer failure
    #[tracing::instrument(
        skip(self, request),
        fields(speaker = %request.speaker, renderer = self.renderer.provider_name())
    )]
    pub async fn speak(
        &self,
        session_id: Uuid,
        request: &UtteranceSpeechRequest,
    ) -> TaleweaverResult<Vec<u8>> {
        let session = self.repository.get_session(session_id).await?;

        let child_label = AgeGroup::Child.to_string();
        let age_group = if is_hero(&request.speaker, &session.player_name) {
            child_label.as_str()
        } else {
            request.age_group.as_str()
        };
        let voice = pick_voice(
            &session.variation.seed,
            &request.speaker,
            age_group,
            request.gender.as_deref(),
            session.target_age,
        );

        if request.text.trim().is_empty() {
            debug!("Blank utterance, returning empty audio");
            return Ok(Vec::new());
        }

        let speech = SpeechRequest {
            instructions: self.style_instructions(
                request.locale.as_deref(),
                AgeGroup::parse(age_group) == Some(AgeGroup::Child),
                &voice.style_instructions,
            ),
            voice: voice.voice_id,
            text: request.text.clone(),
            speed: clamp_speed(request.speed),
            format: self.config.speech().format,
        };

        debug!(voice = %speech.voice, speed = speech.speed, "Rendering utterance");
        self.renderer.render(&speech).await
    }

    fn style_instructions(&self, locale: Option<&str>, child: bool, voice_style: &str) -> String {
        let speech = self.config.speech();
        let locale = locale
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&speech.locale);

        let guidance = speech
            .guidance_for(locale)
            .map(|g| if child { g.child.as_str() } else { g.adult.as_str() })
            .unwrap_or_default();

        match (guidance.trim().is_empty(), voice_style.trim().is_empty()) {
            (true, _) => voice_style.to_string(),
            (false, true) => guidance.to_string(),
            (false, false) => format!("{}\n{}", guidance, voice_style),
        }
    }
}
